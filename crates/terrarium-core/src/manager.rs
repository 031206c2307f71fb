//! Environment orchestration
//!
//! Sequences store lookups and runtime invocations per named environment.
//! The store key (environment name) and the container name inside the
//! definition are independent; all runtime calls use the container name.

use crate::{CoreError, Result};
use terrarium_config::{EnvironmentConfig, EnvironmentStore};
use terrarium_runtime::{ContainerId, ContainerRuntime, RuntimeError};

/// Manages named environments over a store and a container runtime
pub struct EnvironmentManager {
    store: EnvironmentStore,
    runtime: Box<dyn ContainerRuntime>,
}

impl EnvironmentManager {
    /// Create a manager over the default store location
    pub fn new(runtime: Box<dyn ContainerRuntime>) -> Result<Self> {
        Ok(Self {
            store: EnvironmentStore::open_default()?,
            runtime,
        })
    }

    /// Create a manager over a specific store
    pub fn with_store(store: EnvironmentStore, runtime: Box<dyn ContainerRuntime>) -> Self {
        Self { store, runtime }
    }

    /// Names of all stored environments
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self.store.list()?)
    }

    /// The stored definition of an environment
    pub fn config(&self, name: &str) -> Result<EnvironmentConfig> {
        Ok(self.store.load(name)?)
    }

    /// Validate and store a new definition, then create its container
    pub async fn setup(&self, name: &str, config: &EnvironmentConfig) -> Result<()> {
        tracing::info!("Setting up environment: {}", name);
        self.store.save(name, config)?;
        self.create(name).await?;
        Ok(())
    }

    /// Create the container for an environment.
    /// Fails if the container already exists.
    pub async fn create(&self, name: &str) -> Result<ContainerId> {
        let env = self.store.load(name)?;
        if self.container_exists(&env.name).await? {
            return Err(CoreError::ContainerExists(env.name));
        }

        tracing::info!("Creating container: {}", env.name);
        let id = self
            .runtime
            .create(&env.name, &env.image, &env.create)
            .await?;
        Ok(id)
    }

    /// Start the container, creating it first if absent
    pub async fn start(&self, name: &str) -> Result<()> {
        let env = self.store.load(name)?;
        self.ensure_created(&env).await?;

        tracing::info!("Starting container: {}", env.name);
        self.runtime.start(&env.name, &env.start).await?;
        Ok(())
    }

    /// Run a named exec profile, creating the container first if absent.
    /// Returns the exec process's exit code.
    pub async fn exec(&self, name: &str, profile: &str) -> Result<i32> {
        let env = self.store.load(name)?;
        let exec = env
            .exec_profile(profile)
            .ok_or_else(|| CoreError::ExecProfileNotFound {
                environment: name.to_string(),
                profile: profile.to_string(),
            })?;
        self.ensure_created(&env).await?;

        tracing::info!("Executing profile '{}' in container: {}", profile, env.name);
        Ok(self.runtime.exec(&env.name, exec).await?)
    }

    /// Stop the container
    pub async fn stop(&self, name: &str) -> Result<()> {
        let env = self.store.load(name)?;
        tracing::info!("Stopping container: {}", env.name);
        self.runtime.stop(&env.name).await?;
        Ok(())
    }

    /// Stop and remove the container, then recreate it
    pub async fn reset(&self, name: &str) -> Result<()> {
        tracing::info!("Resetting environment: {}", name);
        let env = self.store.load(name)?;
        self.teardown_container(&env.name).await?;
        self.create(name).await?;
        Ok(())
    }

    /// Stop and remove the container, then delete the stored definition
    pub async fn remove(&self, name: &str) -> Result<()> {
        tracing::info!("Removing environment: {}", name);
        let env = self.store.load(name)?;
        self.teardown_container(&env.name).await?;
        self.store.delete(name)?;
        Ok(())
    }

    /// Stop and remove a container if it exists
    async fn teardown_container(&self, container: &str) -> Result<()> {
        if !self.container_exists(container).await? {
            tracing::debug!("Container {} does not exist, nothing to tear down", container);
            return Ok(());
        }

        tracing::info!("Stopping container: {}", container);
        self.runtime.stop(container).await?;
        tracing::info!("Deleting container: {}", container);
        self.runtime.remove(container).await?;
        Ok(())
    }

    /// Create the container if it does not exist yet
    async fn ensure_created(&self, env: &EnvironmentConfig) -> Result<()> {
        if !self.container_exists(&env.name).await? {
            tracing::info!("Creating container: {}", env.name);
            self.runtime
                .create(&env.name, &env.image, &env.create)
                .await?;
        }
        Ok(())
    }

    async fn container_exists(&self, container: &str) -> Result<bool> {
        match self.runtime.inspect(container).await {
            Ok(_) => Ok(true),
            Err(RuntimeError::ContainerNotFound(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
