//! Fast CLI tests using assert_cmd.
//! These test the binary directly without needing a container runtime.

#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but works fine

use assert_cmd::Command;
use predicates::prelude::*;

/// Template JSON with the container name swapped in
fn definition_json(container: &str) -> String {
    format!(
        r#"{{
            "name": "{container}",
            "image": "alpine:3",
            "create": {{"options": "-it"}},
            "start": "",
            "execs": [{{"name": "shell", "command": "/bin/sh", "options": "-it"}}]
        }}"#
    )
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("terrarium")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Container environment manager"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("terrarium")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn test_subcommand_help() {
    for subcmd in &[
        "list", "template", "inspect", "setup", "remove", "reset", "start", "exec", "stop",
        "config",
    ] {
        Command::cargo_bin("terrarium")
            .unwrap()
            .args([subcmd, "--help"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty().not());
    }
}

#[test]
fn test_unknown_subcommand_fails() {
    Command::cargo_bin("terrarium")
        .unwrap()
        .arg("nonexistent-subcommand")
        .assert()
        .failure();
}

#[test]
fn test_no_subcommand_fails() {
    Command::cargo_bin("terrarium").unwrap().assert().failure();
}

#[test]
fn test_template_prints_placeholders() {
    Command::cargo_bin("terrarium")
        .unwrap()
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::contains("IMAGE:TAG"))
        .stdout(predicate::str::contains("execs"));
}

#[test]
fn test_list_empty_store() {
    let tmp = tempfile::tempdir().unwrap();
    Command::cargo_bin("terrarium")
        .unwrap()
        .arg("list")
        .env("TERRARIUM_DATA_DIR", tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No environments found"));
}

#[test]
fn test_inspect_missing_environment_fails() {
    let tmp = tempfile::tempdir().unwrap();
    Command::cargo_bin("terrarium")
        .unwrap()
        .args(["inspect", "missing"])
        .env("TERRARIUM_DATA_DIR", tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_list_and_inspect_stored_environment() {
    let tmp = tempfile::tempdir().unwrap();
    let env_dir = tmp.path().join("environments");
    std::fs::create_dir_all(&env_dir).unwrap();
    std::fs::write(env_dir.join("web.json"), definition_json("web-box")).unwrap();

    Command::cargo_bin("terrarium")
        .unwrap()
        .arg("list")
        .env("TERRARIUM_DATA_DIR", tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("web"));

    Command::cargo_bin("terrarium")
        .unwrap()
        .args(["inspect", "web"])
        .env("TERRARIUM_DATA_DIR", tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("web-box"))
        .stdout(predicate::str::contains("alpine:3"));
}

#[test]
fn test_setup_missing_file_fails() {
    let tmp = tempfile::tempdir().unwrap();
    // Fails either at runtime detection or at reading the file; both are
    // failures with a message on stderr.
    Command::cargo_bin("terrarium")
        .unwrap()
        .args(["setup", "web", "--file", "/definitely/not/there.json"])
        .env("TERRARIUM_DATA_DIR", tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_config_shows_output() {
    Command::cargo_bin("terrarium")
        .unwrap()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}
