//! Container runtime abstraction for terrarium
//!
//! Drives the docker or podman CLI directly instead of the daemon API:
//! simpler, picks up the user's credentials and context automatically, and
//! works with Docker alternatives (Colima, Rancher, OrbStack).

pub mod args;
mod cli_runtime;
mod error;
mod types;

pub use cli_runtime::CliRuntime;
pub use error::*;
pub use types::*;

use async_trait::async_trait;
use terrarium_config::{CreateSpec, ExecProfile, GlobalConfig};

/// Trait for container runtimes (Docker, Podman)
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Get detailed information about a container
    async fn inspect(&self, container: &str) -> Result<ContainerDetails>;

    /// Create a container from an image
    async fn create(&self, container: &str, image: &str, create: &CreateSpec)
        -> Result<ContainerId>;

    /// Start a container with raw option flags, attached to the terminal
    async fn start(&self, container: &str, options: &str) -> Result<()>;

    /// Run an exec profile in a container, attached to the terminal.
    /// Returns the exec process's exit code.
    async fn exec(&self, container: &str, profile: &ExecProfile) -> Result<i32>;

    /// Stop a container
    async fn stop(&self, container: &str) -> Result<()>;

    /// Remove a container
    async fn remove(&self, container: &str) -> Result<()>;

    /// Check if the runtime is available
    async fn ping(&self) -> Result<()>;

    /// Which runtime this is
    fn runtime_type(&self) -> RuntimeType;
}

/// Create a runtime of a specific type, verifying it responds
pub async fn create_runtime(
    runtime_type: RuntimeType,
    config: &GlobalConfig,
) -> Result<CliRuntime> {
    let command = match runtime_type {
        RuntimeType::Docker => &config.runtimes.docker.command,
        RuntimeType::Podman => &config.runtimes.podman.command,
    };
    let runtime = CliRuntime::new(runtime_type, command);
    runtime.ping().await?;
    Ok(runtime)
}

/// Create a runtime of a specific type, wrapping failures in an actionable
/// connection error
pub async fn create_selected_runtime(
    runtime_type: RuntimeType,
    config: &GlobalConfig,
) -> Result<Box<dyn ContainerRuntime>> {
    match create_runtime(runtime_type, config).await {
        Ok(runtime) => Ok(Box::new(runtime)),
        Err(e) => Err(RuntimeError::ConnectionError(format_connection_error(
            runtime_type,
            config,
            &e,
        ))),
    }
}

/// Test if a specific runtime is available and responsive
pub async fn test_runtime_connectivity(
    runtime_type: RuntimeType,
    config: &GlobalConfig,
) -> bool {
    create_runtime(runtime_type, config).await.is_ok()
}

/// Detect which runtimes are available on the system.
/// Tests Docker first, then Podman.
pub async fn detect_available_runtimes(config: &GlobalConfig) -> Vec<(RuntimeType, bool)> {
    let (docker, podman) = tokio::join!(
        test_runtime_connectivity(RuntimeType::Docker, config),
        test_runtime_connectivity(RuntimeType::Podman, config)
    );

    vec![(RuntimeType::Docker, docker), (RuntimeType::Podman, podman)]
}

/// Create the default runtime based on global config.
/// If no runtime is configured (empty), auto-detects by trying Docker first,
/// then Podman.
pub async fn create_default_runtime(config: &GlobalConfig) -> Result<Box<dyn ContainerRuntime>> {
    let runtime_type = match config.defaults.runtime.as_str() {
        "podman" => RuntimeType::Podman,
        "docker" => RuntimeType::Docker,
        "" => {
            tracing::info!("No runtime configured, auto-detecting...");
            let available = detect_available_runtimes(config).await;
            match available.iter().find(|(_, available)| *available) {
                Some((runtime_type, _)) => {
                    tracing::info!("Auto-detected runtime: {}", runtime_type);
                    *runtime_type
                }
                None => {
                    // Neither available, default to Docker for better error messages
                    tracing::warn!("No runtimes detected, defaulting to Docker");
                    RuntimeType::Docker
                }
            }
        }
        other => {
            tracing::warn!("Unknown runtime '{}' in config, defaulting to Docker", other);
            RuntimeType::Docker
        }
    };

    create_selected_runtime(runtime_type, config).await
}

/// Format a helpful connection error message with actionable instructions
fn format_connection_error(
    runtime_type: RuntimeType,
    config: &GlobalConfig,
    underlying: &RuntimeError,
) -> String {
    let command = match runtime_type {
        RuntimeType::Docker => &config.runtimes.docker.command,
        RuntimeType::Podman => &config.runtimes.podman.command,
    };

    let mut msg = format!("Cannot run '{}'\n\n", command);
    msg.push_str(&format!(
        "Make sure {} is installed and on your PATH",
        runtime_type
    ));
    if runtime_type == RuntimeType::Docker {
        msg.push_str(", and the daemon is running:\n  sudo systemctl enable --now docker\n");
    } else {
        msg.push('\n');
    }
    msg.push_str(&format!("\nUnderlying error: {}\n", underlying));
    msg
}
