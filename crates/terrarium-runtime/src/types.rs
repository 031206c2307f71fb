//! Common types for container runtimes

use crate::{Result, RuntimeError};
use serde::{Deserialize, Serialize};

/// Container ID wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        if self.0.len() > 12 {
            &self.0[..12]
        } else {
            &self.0
        }
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Container runtime type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Docker => write!(f, "docker"),
            Self::Podman => write!(f, "podman"),
        }
    }
}

impl std::str::FromStr for RuntimeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "docker" => Ok(Self::Docker),
            "podman" => Ok(Self::Podman),
            _ => Err(format!("Unknown runtime type: {}", s)),
        }
    }
}

/// Container status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    Unknown,
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Restarting => write!(f, "restarting"),
            Self::Removing => write!(f, "removing"),
            Self::Exited => write!(f, "exited"),
            Self::Dead => write!(f, "dead"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<&str> for ContainerStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "exited" => Self::Exited,
            "dead" => Self::Dead,
            _ => Self::Unknown,
        }
    }
}

/// Details reported by `container inspect`
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerDetails {
    pub id: ContainerId,
    pub name: String,
    pub status: ContainerStatus,
    pub image: String,
}

/// Parse the JSON array emitted by `docker/podman container inspect`.
///
/// Returns `Ok(None)` for an empty array, which both runtimes print when the
/// container does not exist.
pub fn parse_inspect_output(output: &str) -> Result<Option<ContainerDetails>> {
    let containers: Vec<serde_json::Value> = serde_json::from_str(output.trim())
        .map_err(|e| RuntimeError::ParseError(e.to_string()))?;

    let Some(container) = containers.first() else {
        return Ok(None);
    };

    let id = container
        .get("Id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RuntimeError::ParseError("inspect output missing 'Id'".to_string()))?;

    // Docker reports names with a leading slash
    let name = container
        .get("Name")
        .and_then(|v| v.as_str())
        .map(|n| n.trim_start_matches('/').to_string())
        .unwrap_or_default();

    let status = container
        .get("State")
        .and_then(|s| s.get("Status"))
        .and_then(|v| v.as_str())
        .map(ContainerStatus::from)
        .unwrap_or(ContainerStatus::Unknown);

    let image = container
        .get("Config")
        .and_then(|c| c.get("Image"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(Some(ContainerDetails {
        id: ContainerId::new(id),
        name,
        status,
        image,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_type_from_str() {
        assert_eq!("docker".parse::<RuntimeType>(), Ok(RuntimeType::Docker));
        assert_eq!("Podman".parse::<RuntimeType>(), Ok(RuntimeType::Podman));
        assert!("containerd".parse::<RuntimeType>().is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(ContainerStatus::from("running"), ContainerStatus::Running);
        assert_eq!(ContainerStatus::from("Exited"), ContainerStatus::Exited);
        assert_eq!(ContainerStatus::from("weird"), ContainerStatus::Unknown);
    }

    #[test]
    fn test_parse_inspect_output() {
        let json = r#"[{
            "Id": "abc123",
            "Name": "/web",
            "State": {"Status": "running"},
            "Config": {"Image": "nginx:latest"}
        }]"#;
        let details = parse_inspect_output(json).unwrap().unwrap();
        assert_eq!(details.id, ContainerId::new("abc123"));
        assert_eq!(details.name, "web");
        assert_eq!(details.status, ContainerStatus::Running);
        assert_eq!(details.image, "nginx:latest");
    }

    #[test]
    fn test_parse_inspect_empty_array() {
        assert_eq!(parse_inspect_output("[]").unwrap(), None);
    }

    #[test]
    fn test_parse_inspect_invalid_json() {
        assert!(parse_inspect_output("not json").is_err());
    }

    #[test]
    fn test_container_id_short() {
        let id = ContainerId::new("0123456789abcdef0123");
        assert_eq!(id.short(), "0123456789ab");
        assert_eq!(ContainerId::new("web").short(), "web");
    }
}
