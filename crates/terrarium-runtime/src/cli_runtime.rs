//! CLI-based container runtime for Docker and Podman

use crate::{
    args, parse_inspect_output, ContainerDetails, ContainerId, ContainerRuntime, Result,
    RuntimeError, RuntimeType,
};
use async_trait::async_trait;
use std::process::Stdio;
use terrarium_config::{CreateSpec, ExecProfile};
use tokio::process::Command;

/// Container runtime driven through the `docker`/`podman` binary
pub struct CliRuntime {
    /// Binary to invoke ("docker", "podman", or an absolute path)
    command: String,
    runtime_type: RuntimeType,
}

impl CliRuntime {
    pub fn new(runtime_type: RuntimeType, command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            runtime_type,
        }
    }

    /// Run a command with captured output
    async fn run_cmd(&self, cmd_args: &[String]) -> Result<String> {
        tracing::debug!("Running: {} {}", self.command, cmd_args.join(" "));

        let output = Command::new(&self.command)
            .args(cmd_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RuntimeError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run a command attached to the terminal (inherited stdio).
    /// Used for start/exec where stored options routinely include `-it`.
    async fn run_attached(&self, cmd_args: &[String]) -> Result<std::process::ExitStatus> {
        tracing::debug!("Running attached: {} {}", self.command, cmd_args.join(" "));

        let status = Command::new(&self.command).args(cmd_args).status().await?;
        Ok(status)
    }
}

#[async_trait]
impl ContainerRuntime for CliRuntime {
    async fn inspect(&self, container: &str) -> Result<ContainerDetails> {
        // Inspect exits non-zero for a missing container but still prints an
        // empty JSON array, so parse stdout regardless of exit status.
        let output = Command::new(&self.command)
            .args(args::inspect_args(container))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_inspect_output(&stdout) {
            Ok(Some(details)) => Ok(details),
            Ok(None) => Err(RuntimeError::ContainerNotFound(container.to_string())),
            Err(parse_err) => {
                if output.status.success() {
                    return Err(parse_err);
                }
                let stderr = String::from_utf8_lossy(&output.stderr);
                if stderr.to_lowercase().contains("no such") {
                    Err(RuntimeError::ContainerNotFound(container.to_string()))
                } else {
                    Err(RuntimeError::CommandFailed(stderr.trim().to_string()))
                }
            }
        }
    }

    async fn create(
        &self,
        container: &str,
        image: &str,
        create: &CreateSpec,
    ) -> Result<ContainerId> {
        let cmd_args = args::create_args(container, image, create)?;
        let output = self.run_cmd(&cmd_args).await?;

        // The runtime prints the new container ID as the last stdout line
        // (pull progress may precede it).
        let id = output
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| {
                RuntimeError::ParseError("create printed no container ID".to_string())
            })?;
        Ok(ContainerId::new(id.trim()))
    }

    async fn start(&self, container: &str, options: &str) -> Result<()> {
        let cmd_args = args::start_args(container, options)?;
        let status = self.run_attached(&cmd_args).await?;
        if !status.success() {
            return Err(RuntimeError::CommandFailed(format!(
                "{} container start exited with {}",
                self.command, status
            )));
        }
        Ok(())
    }

    async fn exec(&self, container: &str, profile: &ExecProfile) -> Result<i32> {
        let cmd_args = args::exec_args(container, profile)?;
        let status = self.run_attached(&cmd_args).await?;
        Ok(status.code().unwrap_or(-1))
    }

    async fn stop(&self, container: &str) -> Result<()> {
        self.run_cmd(&args::stop_args(container)).await?;
        Ok(())
    }

    async fn remove(&self, container: &str) -> Result<()> {
        self.run_cmd(&args::remove_args(container)).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.run_cmd(&["--version".to_string()]).await?;
        Ok(())
    }

    fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }
}
