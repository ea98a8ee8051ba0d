//! Integration tests for the oomax binary's exit codes and error output.

use std::process::Command;
use tempfile::TempDir;

fn oomax(config_home: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_oomax"));
    command
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("OOMAX_LOG");
    command
}

#[test]
fn test_illegal_macro_name_is_a_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = oomax(&temp_dir)
        .args(["push", "Untitled 1", "Standard"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Illegal macro name: Standard"),
        "stderr={:?}",
        stderr
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_extra_segments_get_past_argument_parsing() {
    let temp_dir = TempDir::new().unwrap();
    let output = oomax(&temp_dir)
        .env("OOMAX_CONNECTION__TIMEOUT_SECS", "2")
        .args(["--host", "127.0.0.1", "--port", "1"])
        .args(["pull", "Untitled 1", "Standard.Module1.main.extra"])
        .output()
        .unwrap();

    // Fails at the bridge, not in usage.
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Illegal macro name"), "stderr={:?}", stderr);
}

#[test]
fn test_unreachable_bridge_exits_with_failure() {
    let temp_dir = TempDir::new().unwrap();
    let output = oomax(&temp_dir)
        .env("OOMAX_CONNECTION__TIMEOUT_SECS", "2")
        .args(["--host", "127.0.0.1", "--port", "1"])
        .args(["pull", "Untitled 1", "Standard.Module1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bridge transport error"), "stderr={:?}", stderr);
    assert!(output.stdout.is_empty(), "nothing is printed on failure");
}

#[test]
fn test_bad_config_file_exits_with_failure() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("bad.toml");
    std::fs::write(&config, "[connection]\nport = 0\n").unwrap();

    let output = oomax(&temp_dir)
        .arg("--config")
        .arg(&config)
        .args(["pull", "Untitled 1", "Standard.Module1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"), "stderr={:?}", stderr);
}

#[test]
fn test_log_env_turns_logging_on() {
    let temp_dir = TempDir::new().unwrap();
    let output = oomax(&temp_dir)
        .env("OOMAX_LOG", "info")
        .env("OOMAX_CONNECTION__TIMEOUT_SECS", "2")
        .args(["--host", "127.0.0.1", "--port", "1"])
        .args(["pull", "Untitled 1", "Standard.Module1"])
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Connecting to office bridge"),
        "stderr={:?}",
        stderr
    );
    assert!(output.stdout.is_empty(), "logs stay off stdout");
}
