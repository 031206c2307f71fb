//! Flat-file store for environment definitions
//!
//! Each environment lives at `<data_dir>/environments/<name>.json`.

use crate::{ConfigError, EnvironmentConfig, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Directory-backed store of named environment definitions
#[derive(Debug, Clone)]
pub struct EnvironmentStore {
    dir: PathBuf,
}

impl EnvironmentStore {
    /// Open a store over a specific directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the store at the default location
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_dir()?))
    }

    /// Default store directory.
    ///
    /// `TERRARIUM_DATA_DIR` overrides the platform data directory; used by
    /// tests and packaging.
    pub fn default_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("TERRARIUM_DATA_DIR") {
            return Ok(PathBuf::from(dir).join("environments"));
        }
        let dirs = ProjectDirs::from("", "", "terrarium").ok_or(ConfigError::NoDataDir)?;
        Ok(dirs.data_dir().join("environments"))
    }

    /// The directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of all stored environments, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // A store that was never written to is empty, not an error
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: self.dir.clone(),
                    source: e,
                })
            }
        };

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Check whether an environment exists
    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Load a stored environment definition
    pub fn load(&self, name: &str) -> Result<EnvironmentConfig> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(ConfigError::NotFound(name.to_string()));
        }
        EnvironmentConfig::load_from(&path)
    }

    /// Validate and write an environment definition
    pub fn save(&self, name: &str, config: &EnvironmentConfig) -> Result<()> {
        config.validate()?;

        std::fs::create_dir_all(&self.dir).map_err(|e| ConfigError::WriteError {
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.path_for(name);
        tracing::debug!("Writing environment '{}' to {:?}", name, path);
        std::fs::write(&path, config.to_pretty()?).map_err(|e| ConfigError::WriteError {
            path,
            source: e,
        })
    }

    /// Delete a stored environment definition
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(ConfigError::NotFound(name.to_string()));
        }
        std::fs::remove_file(&path).map_err(|e| ConfigError::WriteError {
            path,
            source: e,
        })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}
