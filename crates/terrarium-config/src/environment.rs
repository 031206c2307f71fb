//! Environment definition parsing and validation
//!
//! An environment is a JSON document describing one container: the image to
//! use, creation options, start options, and named exec profiles.

use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// A named environment definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Container name
    pub name: String,

    /// Image reference (e.g. "ubuntu:22.04")
    pub image: String,

    /// Options for container creation
    pub create: CreateSpec,

    /// Raw flags passed to the runtime's `start` command (may be empty)
    pub start: String,

    /// Named shortcuts for running commands inside the container
    pub execs: Vec<ExecProfile>,
}

/// Container creation options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateSpec {
    /// Entrypoint override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,

    /// Command appended after the image.
    /// Always serialized so the template shows the field.
    pub command: Vec<String>,

    /// Environment variables set in the container.
    /// BTreeMap keeps the emitted `-e` flags in a stable order.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, String>,

    /// Port publications
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortMapping>,

    /// Bind mounts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VolumeMount>,

    /// Raw extra flags for the `create` command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

/// A single port publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PortMapping {
    pub host_port: u16,
    pub container_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(rename = "hostIP", skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,
}

/// Port protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single bind mount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct VolumeMount {
    pub host_path: String,
    pub container_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<VolumeMode>,
}

/// Bind mount access mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeMode {
    Ro,
    Rw,
}

impl VolumeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ro => "ro",
            Self::Rw => "rw",
        }
    }
}

impl std::fmt::Display for VolumeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named exec shortcut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecProfile {
    pub name: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl EnvironmentConfig {
    /// Load an environment definition from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parse an environment definition from JSON content
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::JsonParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Starter document with placeholders for every supported field
    pub fn template() -> Self {
        Self {
            name: "NAME".to_string(),
            image: "IMAGE:TAG".to_string(),
            create: CreateSpec {
                entrypoint: Some("ENTRYPOINT".to_string()),
                command: Vec::new(),
                envs: BTreeMap::from([("KEY".to_string(), "VALUE".to_string())]),
                ports: vec![PortMapping {
                    host_port: 8080,
                    container_port: 8080,
                    protocol: None,
                    host_ip: None,
                }],
                volumes: vec![VolumeMount {
                    host_path: "/PATH/ON/HOST".to_string(),
                    container_path: "/PATH/ON/CONTAINER".to_string(),
                    mode: Some(VolumeMode::Rw),
                }],
                options: Some("-it --hostname HOSTNAME".to_string()),
            },
            start: String::new(),
            execs: vec![ExecProfile {
                name: "EXEC-NAME".to_string(),
                command: "EXEC_COMMAND".to_string(),
                options: Some("-it".to_string()),
            }],
        }
    }

    /// Check constraints the type system can't express
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("'name' must not be empty".to_string()));
        }
        if self.image.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "'image' must not be empty".to_string(),
            ));
        }

        for port in &self.create.ports {
            if port.host_port == 0 || port.container_port == 0 {
                return Err(ConfigError::Invalid(format!(
                    "port mapping {}:{} uses port 0",
                    port.host_port, port.container_port
                )));
            }
        }

        for volume in &self.create.volumes {
            if volume.host_path.is_empty() || volume.container_path.is_empty() {
                return Err(ConfigError::Invalid(
                    "volume paths must not be empty".to_string(),
                ));
            }
        }

        if let Some(ref options) = self.create.options {
            check_splittable("create.options", options)?;
        }
        check_splittable("start", &self.start)?;

        let mut seen = HashSet::new();
        for exec in &self.execs {
            if exec.name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "exec profile name must not be empty".to_string(),
                ));
            }
            if !seen.insert(exec.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate exec profile name: {}",
                    exec.name
                )));
            }
            if exec.command.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "exec profile '{}' has an empty command",
                    exec.name
                )));
            }
            check_splittable(&format!("execs.{}.command", exec.name), &exec.command)?;
            if let Some(ref options) = exec.options {
                check_splittable(&format!("execs.{}.options", exec.name), options)?;
            }
        }

        Ok(())
    }

    /// Look up an exec profile by name
    pub fn exec_profile(&self, name: &str) -> Option<&ExecProfile> {
        self.execs.iter().find(|e| e.name == name)
    }
}

/// Verify a raw option string can be split into tokens
fn check_splittable(field: &str, value: &str) -> Result<()> {
    shell_words::split(value)
        .map(|_| ())
        .map_err(|e| ConfigError::Invalid(format!("'{}' is not a valid option string: {}", field, e)))
}
