//! Integration tests for the `ezvy` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring EZVIZ cloud access.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `ezvy` binary with env isolation.
///
/// Clears all `EZVY_*` env vars and points the config directory at a
/// nonexistent path so tests never touch the user's real configuration.
fn ezvy_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ezvy");
    cmd.env("HOME", "/tmp/ezvy-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/ezvy-cli-test-nonexistent")
        .env("EZVY_CONFIG_DIR", "/tmp/ezvy-cli-test-nonexistent")
        .env_remove("EZVY_ACCOUNT")
        .env_remove("EZVY_OUTPUT")
        .env_remove("EZVY_TIMEOUT")
        .env_remove("EZVY_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = ezvy_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    ezvy_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("EZVIZ")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("switches"))
            .and(predicate::str::contains("doorbell"))
            .and(predicate::str::contains("setup")),
    );
}

#[test]
fn test_version_flag() {
    ezvy_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ezvy"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    ezvy_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    ezvy_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = ezvy_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_list_no_account() {
    let output = ezvy_cmd().args(["devices", "list"]).output().unwrap();
    assert!(!output.status.success());
    // No account configured -> exit code 4 (not found)
    let text = combined_output(&output);
    assert!(
        text.contains("setup") || text.contains("account"),
        "Expected hint about running setup:\n{text}"
    );
}

#[test]
fn test_unknown_account_exit_code() {
    let output = ezvy_cmd()
        .args(["--account", "nope", "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(4),
        "unknown account should exit with the not-found code"
    );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    ezvy_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_invalid_output_format() {
    let output = ezvy_cmd()
        .args(["--output", "invalid", "devices", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_setup_non_interactive_requires_password() {
    let output = ezvy_cmd()
        .args(["setup", "--email", "user@example.com", "--region", "eu"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("EZVY_PASSWORD"),
        "Expected hint about EZVY_PASSWORD:\n{text}"
    );
}

#[test]
fn test_setup_failed_validation_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    // Port 1 refuses connections, so login validation fails before
    // anything is written.
    let output = ezvy_cmd()
        .env("EZVY_CONFIG_DIR", dir.path())
        .env("EZVY_PASSWORD", "hunter2")
        .args([
            "setup",
            "--email",
            "user@example.com",
            "--api-host",
            "127.0.0.1:1",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(
        !dir.path().join("config.toml").exists(),
        "failed validation must not persist an account record"
    );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_switches_subcommands_exist() {
    ezvy_cmd()
        .args(["switches", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("on"))
                .and(predicate::str::contains("off"))
                .and(predicate::str::contains("status")),
        );
}

#[test]
fn test_doorbell_subcommands_exist() {
    ezvy_cmd()
        .args(["doorbell", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("events")
                .and(predicate::str::contains("snapshot"))
                .and(predicate::str::contains("open-gate")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    ezvy_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("show")
                .and(predicate::str::contains("accounts"))
                .and(predicate::str::contains("use"))
                .and(predicate::str::contains("set-password")),
        );
}
