//
//  codeship-client
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end tests of the `codeship` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "CODESHIP_ORG_UUID",
    "CODESHIP_ORG_NAME",
    "CODESHIP_USERNAME",
    "CODESHIP_PASSWORD",
    "CODESHIP_API_ROOT",
    "CODESHIP_CONFIG",
    "CODESHIP_DEBUG",
];

/// The binary with no ambient `CODESHIP_*` settings, reading `config`.
fn codeship(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("codeship").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1").arg("--config").arg(config);
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    codeship(&dir.path().join("config.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Codeship"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("project"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    codeship(&dir.path().join("config.toml"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("codeship version "));
}

#[test]
fn test_missing_credentials_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    codeship(&dir.path().join("config.toml"))
        .args(["project", "list", "--org-name", "acme"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("credentials not supplied"));
}

#[test]
fn test_build_list_without_project_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    codeship(&dir.path().join("config.toml"))
        .args(["build", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing project context"));
}

#[test]
fn test_config_show_hides_password() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[account]\nusername = \"me\"\npassword = \"hunter2\"\norg_name = \"acme\"\n",
    )
    .unwrap();

    codeship(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("me"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_path_honours_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    codeship(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_completion_uses_binary_name() {
    let dir = TempDir::new().unwrap();
    codeship(&dir.path().join("config.toml"))
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("codeship"));
}

#[test]
fn test_project_list_json_against_mock_server() {
    let mut server = mockito::Server::new();
    let _auth = server
        .mock("POST", "/auth")
        .match_header("authorization", "Basic bWU6c2VjcmV0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"access_token": "tok1", "organizations": [{"uuid": "org-1", "name": "acme"}]})
                .to_string(),
        )
        .create();
    let _projects = server
        .mock("GET", "/organizations/org-1/projects")
        .match_header("authorization", "Bearer tok1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"projects": [{"uuid": "p1", "name": "web", "type": "pro"}]}).to_string())
        .create();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[account]\nusername = \"me\"\norg_name = \"acme\"\n").unwrap();

    codeship(&path)
        .env("CODESHIP_PASSWORD", "secret")
        .args(["project", "list", "--json", "--api-root", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"web\""));
}

#[test]
fn test_rejected_credentials_exit_with_auth_code() {
    let mut server = mockito::Server::new();
    let _auth = server
        .mock("POST", "/auth")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({"errors": ["Unauthorized"]}).to_string())
        .create();

    let dir = TempDir::new().unwrap();
    codeship(&dir.path().join("config.toml"))
        .args(["auth", "check", "-u", "me", "--password", "wrong", "--org-name", "acme"])
        .args(["--api-root", &server.url()])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Authentication failed"));
}
