//! Error types for terrarium-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] terrarium_config::ConfigError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] terrarium_runtime::RuntimeError),

    #[error("Container already exists: {0}. Reset the environment to recreate it")]
    ContainerExists(String),

    #[error("Environment '{environment}' has no exec profile named '{profile}'")]
    ExecProfileNotFound {
        environment: String,
        profile: String,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
