//! Error types for container runtimes

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Failed to connect to container runtime: {0}")]
    ConnectionError(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Container runtime command failed: {0}")]
    CommandFailed(String),

    #[error("Failed to parse runtime output: {0}")]
    ParseError(String),

    #[error("Invalid option string '{value}': {reason}")]
    InvalidOptions { value: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
