//! Command builders for container lifecycle actions
//!
//! Pure functions mapping a validated environment definition to the exact
//! argument vector for one `docker`/`podman` invocation. Flag order is
//! normative: entrypoint, envs, ports, volumes, raw options, name, image,
//! command.

use crate::{Result, RuntimeError};
use terrarium_config::{CreateSpec, ExecProfile, PortMapping, VolumeMount};

/// Arguments for `container create`
pub fn create_args(container: &str, image: &str, create: &CreateSpec) -> Result<Vec<String>> {
    let mut args = vec!["container".to_string(), "create".to_string()];

    if let Some(ref entrypoint) = create.entrypoint {
        args.push("--entrypoint".to_string());
        args.push(entrypoint.clone());
    }

    // BTreeMap iteration keeps env flags in a stable order
    for (key, value) in &create.envs {
        args.push("-e".to_string());
        args.push(format!("{}={}", key, value));
    }

    for port in &create.ports {
        args.push("-p".to_string());
        args.push(port_spec(port));
    }

    for volume in &create.volumes {
        args.push("-v".to_string());
        args.push(volume_spec(volume));
    }

    if let Some(ref options) = create.options {
        args.extend(split_options(options)?);
    }

    args.push("--name".to_string());
    args.push(container.to_string());
    args.push(image.to_string());
    args.extend(create.command.iter().cloned());

    Ok(args)
}

/// Arguments for `container start`
pub fn start_args(container: &str, options: &str) -> Result<Vec<String>> {
    let mut args = vec!["container".to_string(), "start".to_string()];
    args.extend(split_options(options)?);
    args.push(container.to_string());
    Ok(args)
}

/// Arguments for `container exec` with a named profile
pub fn exec_args(container: &str, profile: &ExecProfile) -> Result<Vec<String>> {
    let mut args = vec!["container".to_string(), "exec".to_string()];
    if let Some(ref options) = profile.options {
        args.extend(split_options(options)?);
    }
    args.push(container.to_string());
    args.extend(split_options(&profile.command)?);
    Ok(args)
}

/// Arguments for `container stop`
pub fn stop_args(container: &str) -> Vec<String> {
    vec![
        "container".to_string(),
        "stop".to_string(),
        container.to_string(),
    ]
}

/// Arguments for `container rm`
pub fn remove_args(container: &str) -> Vec<String> {
    vec![
        "container".to_string(),
        "rm".to_string(),
        container.to_string(),
    ]
}

/// Arguments for `container inspect`
pub fn inspect_args(container: &str) -> Vec<String> {
    vec![
        "container".to_string(),
        "inspect".to_string(),
        container.to_string(),
    ]
}

/// Format a `-p` publication spec: `[ip:]host:container/protocol`
fn port_spec(port: &PortMapping) -> String {
    let protocol = port.protocol.map(|p| p.as_str()).unwrap_or("tcp");
    match port.host_ip {
        Some(ref ip) => format!(
            "{}:{}:{}/{}",
            ip, port.host_port, port.container_port, protocol
        ),
        None => format!("{}:{}/{}", port.host_port, port.container_port, protocol),
    }
}

/// Format a `-v` bind mount spec: `host:container:mode`
fn volume_spec(volume: &VolumeMount) -> String {
    let mode = volume.mode.map(|m| m.as_str()).unwrap_or("rw");
    format!("{}:{}:{}", volume.host_path, volume.container_path, mode)
}

/// Split a raw option string into tokens, quote-aware
fn split_options(options: &str) -> Result<Vec<String>> {
    shell_words::split(options).map_err(|e| RuntimeError::InvalidOptions {
        value: options.to_string(),
        reason: e.to_string(),
    })
}
