//! Test support utilities for terrarium-core
//!
//! Provides MockRuntime for unit testing the EnvironmentManager without a
//! real docker/podman binary.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use terrarium_config::{CreateSpec, ExecProfile};
use terrarium_runtime::{
    ContainerDetails, ContainerId, ContainerRuntime, ContainerStatus, Result, RuntimeError,
    RuntimeType,
};

/// Records which methods were called on the mock
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Inspect { container: String },
    Create { container: String, image: String },
    Start { container: String, options: String },
    Exec { container: String, profile: String },
    Stop { container: String },
    Remove { container: String },
    Ping,
}

/// Configurable mock container runtime for testing
pub struct MockRuntime {
    pub calls: Arc<Mutex<Vec<MockCall>>>,
    /// Result for inspect calls
    pub inspect_result: Arc<Mutex<Result<ContainerDetails>>>,
    /// Result for create calls
    pub create_result: Arc<Mutex<Result<ContainerId>>>,
    /// Result for start calls
    pub start_result: Arc<Mutex<Result<()>>>,
    /// Exit code for exec calls
    pub exec_exit_code: Arc<Mutex<i32>>,
    /// Result for stop calls
    pub stop_result: Arc<Mutex<Result<()>>>,
    /// Result for remove calls
    pub remove_result: Arc<Mutex<Result<()>>>,
}

impl MockRuntime {
    /// Mock where the container already exists and every call succeeds
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            inspect_result: Arc::new(Mutex::new(Ok(mock_container_details(
                "mock_container_id",
                ContainerStatus::Running,
            )))),
            create_result: Arc::new(Mutex::new(Ok(ContainerId::new("mock_container_id")))),
            start_result: Arc::new(Mutex::new(Ok(()))),
            exec_exit_code: Arc::new(Mutex::new(0)),
            stop_result: Arc::new(Mutex::new(Ok(()))),
            remove_result: Arc::new(Mutex::new(Ok(()))),
        }
    }

    /// Mock where the container does not exist yet
    pub fn without_container() -> Self {
        let mock = Self::new();
        *mock.inspect_result.lock().unwrap() =
            Err(RuntimeError::ContainerNotFound("mock".to_string()));
        mock
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a specific call was made
    pub fn was_called(&self, call: &MockCall) -> bool {
        self.calls.lock().unwrap().contains(call)
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to clone a Result<T> from an Arc<Mutex<Result<T>>>
fn clone_result<T: Clone>(r: &Arc<Mutex<Result<T>>>) -> Result<T> {
    let guard = r.lock().unwrap();
    match &*guard {
        Ok(v) => Ok(v.clone()),
        Err(e) => Err(clone_runtime_error(e)),
    }
}

/// Clone a RuntimeError (thiserror types don't implement Clone)
fn clone_runtime_error(e: &RuntimeError) -> RuntimeError {
    match e {
        RuntimeError::ConnectionError(s) => RuntimeError::ConnectionError(s.clone()),
        RuntimeError::ContainerNotFound(s) => RuntimeError::ContainerNotFound(s.clone()),
        RuntimeError::CommandFailed(s) => RuntimeError::CommandFailed(s.clone()),
        RuntimeError::ParseError(s) => RuntimeError::ParseError(s.clone()),
        RuntimeError::InvalidOptions { value, reason } => RuntimeError::InvalidOptions {
            value: value.clone(),
            reason: reason.clone(),
        },
        RuntimeError::IoError(_) => RuntimeError::CommandFailed("IO error (cloned)".into()),
    }
}

/// Create a mock ContainerDetails
pub fn mock_container_details(id: &str, status: ContainerStatus) -> ContainerDetails {
    ContainerDetails {
        id: ContainerId::new(id),
        name: "mock_container".to_string(),
        status,
        image: "mock_image:latest".to_string(),
    }
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    async fn inspect(&self, container: &str) -> Result<ContainerDetails> {
        self.record(MockCall::Inspect {
            container: container.to_string(),
        });
        clone_result(&self.inspect_result)
    }

    async fn create(
        &self,
        container: &str,
        image: &str,
        _create: &CreateSpec,
    ) -> Result<ContainerId> {
        self.record(MockCall::Create {
            container: container.to_string(),
            image: image.to_string(),
        });
        clone_result(&self.create_result)
    }

    async fn start(&self, container: &str, options: &str) -> Result<()> {
        self.record(MockCall::Start {
            container: container.to_string(),
            options: options.to_string(),
        });
        clone_result(&self.start_result)
    }

    async fn exec(&self, container: &str, profile: &ExecProfile) -> Result<i32> {
        self.record(MockCall::Exec {
            container: container.to_string(),
            profile: profile.name.clone(),
        });
        Ok(*self.exec_exit_code.lock().unwrap())
    }

    async fn stop(&self, container: &str) -> Result<()> {
        self.record(MockCall::Stop {
            container: container.to_string(),
        });
        clone_result(&self.stop_result)
    }

    async fn remove(&self, container: &str) -> Result<()> {
        self.record(MockCall::Remove {
            container: container.to_string(),
        });
        clone_result(&self.remove_result)
    }

    async fn ping(&self) -> Result<()> {
        self.record(MockCall::Ping);
        Ok(())
    }

    fn runtime_type(&self) -> RuntimeType {
        RuntimeType::Docker
    }
}
