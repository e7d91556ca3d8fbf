use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".jemuran").join("config.json")
}

const BINARY_NAME: &str = "jemuran";

/// Nothing listens on the discard port.
const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

fn jemuran(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path()) // simulate different $HOME
        .env_remove("JEMURAN_SERVER_URL");
    cmd
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"))
        .stdout(contains("set-mode"));
}

#[test]
/// Reset command should delete an existing config file.
fn reset_deletes_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    jemuran(&tmp)
        .arg("reset")
        .assert()
        .success()
        .stdout(contains("Clearing dashboard configuration"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}

#[test]
/// Reset without a config file is not an error.
fn reset_without_config_succeeds() {
    let tmp = temp_home_dir();
    jemuran(&tmp).arg("reset").assert().success();
}

#[test]
/// Configure writes the given flags to the config file.
fn configure_writes_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);

    jemuran(&tmp)
        .args([
            "configure",
            "--server-url",
            "http://192.168.1.20:5000/",
            "--control-model",
            "binary",
            "--interval-ms",
            "3000",
            "--only-system-on",
        ])
        .assert()
        .success()
        .stdout(contains("Configuration saved"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(saved["server_url"], "http://192.168.1.20:5000");
    assert_eq!(saved["control_model"], "binary");
    assert_eq!(saved["poll_interval_ms"], 3000);
    assert_eq!(saved["only_system_on"], true);
}

#[test]
/// Configure rejects a server URL without a scheme.
fn configure_rejects_bad_url() {
    let tmp = temp_home_dir();
    jemuran(&tmp)
        .args(["configure", "--server-url", "192.168.1.20"])
        .assert()
        .failure();
    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// Status against a dead backend fails instead of hanging.
fn status_fails_when_backend_unreachable() {
    let tmp = temp_home_dir();
    jemuran(&tmp)
        .args(["status", "--server-url", UNREACHABLE_URL])
        .assert()
        .failure()
        .stderr(contains("Failed to reach the backend"));
}

#[test]
/// Unknown modes are rejected by the argument parser.
fn set_mode_rejects_unknown_mode() {
    let tmp = temp_home_dir();
    jemuran(&tmp)
        .args(["set-mode", "turbo", "--server-url", UNREACHABLE_URL])
        .assert()
        .failure();
}

#[test]
/// Configuring one setting keeps the history filter saved earlier.
fn configure_keeps_unmentioned_history_filter() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    let saved_filter = || {
        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
        saved["only_system_on"].clone()
    };

    jemuran(&tmp)
        .args(["configure", "--only-system-on"])
        .assert()
        .success();
    jemuran(&tmp)
        .args(["configure", "--server-url", "http://10.0.0.5:5000"])
        .assert()
        .success();
    assert_eq!(saved_filter(), true);

    jemuran(&tmp)
        .args(["configure", "--all-history"])
        .assert()
        .success();
    assert_eq!(saved_filter(), false);
}

#[test]
/// The two history filter flags cannot be combined.
fn configure_rejects_conflicting_history_flags() {
    let tmp = temp_home_dir();
    jemuran(&tmp)
        .args(["configure", "--only-system-on", "--all-history"])
        .assert()
        .failure();
    assert!(!config_file_path(&tmp).exists());
}
