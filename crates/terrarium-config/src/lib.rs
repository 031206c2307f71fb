//! Configuration for terrarium - environment definitions and global config

mod environment;
mod error;
mod global;
mod store;

pub use environment::{
    CreateSpec, EnvironmentConfig, ExecProfile, PortMapping, Protocol, VolumeMode, VolumeMount,
};
pub use error::{ConfigError, Result};
pub use global::{DefaultsConfig, GlobalConfig, RuntimeCommandConfig, RuntimesConfig};
pub use store::EnvironmentStore;
