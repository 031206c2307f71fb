//! Global configuration for terrarium
//!
//! Located at `~/.config/terrarium/config.toml`

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global terrarium configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub defaults: DefaultsConfig,
    pub runtimes: RuntimesConfig,
}

/// Default settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default container runtime ("docker" or "podman").
    /// Empty means auto-detect.
    pub runtime: String,
}

/// Runtime-specific configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimesConfig {
    pub docker: RuntimeCommandConfig,
    pub podman: RuntimeCommandConfig,
}

impl Default for RuntimesConfig {
    fn default() -> Self {
        Self {
            docker: RuntimeCommandConfig {
                command: "docker".to_string(),
            },
            podman: RuntimeCommandConfig {
                command: "podman".to_string(),
            },
        }
    }
}

/// Binary override for one runtime
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeCommandConfig {
    /// Binary to invoke (name on PATH or absolute path)
    pub command: String,
}

impl GlobalConfig {
    /// Load global configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load global configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            path: path.clone(),
            source: e,
        })
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.clone(),
                source: e,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "terrarium").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert!(config.defaults.runtime.is_empty(), "runtime should be empty for auto-detection");
        assert_eq!(config.runtimes.docker.command, "docker");
        assert_eq!(config.runtimes.podman.command, "podman");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[defaults]
runtime = "podman"

[runtimes.podman]
command = "/usr/local/bin/podman"
"#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.defaults.runtime, "podman");
        assert_eq!(config.runtimes.podman.command, "/usr/local/bin/podman");
        // Unspecified sections keep their defaults
        assert_eq!(config.runtimes.docker.command, "docker");
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = GlobalConfig::default();
        config.defaults.runtime = "docker".to_string();
        config.save_to(&path).unwrap();

        let loaded = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.runtime, "docker");
    }
}
