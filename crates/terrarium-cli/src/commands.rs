//! Command implementations for the terrarium CLI

use anyhow::{Context, Result};
use std::path::Path;
use terrarium_config::{EnvironmentConfig, EnvironmentStore, GlobalConfig};
use terrarium_core::EnvironmentManager;

/// List stored environments
pub fn list(store: &EnvironmentStore) -> Result<()> {
    let names = store.list()?;

    if names.is_empty() {
        println!("No environments found.");
        println!("\nUse 'terrarium setup <name> --file <definition.json>' to add one.");
        return Ok(());
    }

    println!("Environments:");
    for name in names {
        println!("  {}", name);
    }
    Ok(())
}

/// Print the template definition
pub fn template() -> Result<()> {
    println!("{}", EnvironmentConfig::template().to_pretty()?);
    Ok(())
}

/// Print the stored definition of one environment
pub fn inspect(store: &EnvironmentStore, name: &str) -> Result<()> {
    let config = store.load(name)?;
    println!("{}", config.to_pretty()?);
    Ok(())
}

/// Print the global configuration
pub fn show_config(config: &GlobalConfig) -> Result<()> {
    if let Ok(path) = GlobalConfig::config_path() {
        println!("# {}", path.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Store a new definition and create its container
pub async fn setup(manager: &EnvironmentManager, name: &str, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let config = EnvironmentConfig::parse(&content, file)?;

    manager.setup(name, &config).await?;
    println!("Environment '{}' is ready", name);
    Ok(())
}

/// Stop and delete the container and the stored definition
pub async fn remove(manager: &EnvironmentManager, name: &str) -> Result<()> {
    manager.remove(name).await?;
    println!("Environment '{}' removed", name);
    Ok(())
}

/// Stop, delete, and recreate the container
pub async fn reset(manager: &EnvironmentManager, name: &str) -> Result<()> {
    manager.reset(name).await?;
    println!("Environment '{}' reset", name);
    Ok(())
}

/// Start the container, creating it first if needed
pub async fn start(manager: &EnvironmentManager, name: &str) -> Result<()> {
    manager.start(name).await?;
    Ok(())
}

/// Run a named exec profile; returns the exec process's exit code
pub async fn exec(manager: &EnvironmentManager, name: &str, exec_name: &str) -> Result<i32> {
    Ok(manager.exec(name, exec_name).await?)
}

/// Stop the container
pub async fn stop(manager: &EnvironmentManager, name: &str) -> Result<()> {
    manager.stop(name).await?;
    Ok(())
}
