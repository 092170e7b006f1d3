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
    dir.path().join(".qrpo").join("config.json")
}

const BINARY_NAME: &str = "qrpo-dashboard";

fn command(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path())
        .env_remove("QRPO_API_URL")
        .env_remove("QRPO_ENVIRONMENT");
    cmd
}

#[test]
/// Help command should list the subcommands.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Usage"))
        .stdout(contains("start"))
        .stdout(contains("simulate"));
}

#[test]
/// `config set-url` should create the config file with the URL.
fn config_set_url_creates_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    command(&tmp)
        .args(["config", "set-url", "http://10.0.0.5:8000/"])
        .assert()
        .success()
        .stdout(contains("Backend URL saved"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("\"api_url\": \"http://10.0.0.5:8000\""));
}

#[test]
fn config_set_url_rejects_garbage() {
    let tmp = temp_home_dir();
    command(&tmp)
        .args(["config", "set-url", "not a url"])
        .assert()
        .failure();
    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// `config clear` should delete an existing config file.
fn config_clear_deletes_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();
    assert!(config_path.exists());

    command(&tmp)
        .args(["config", "clear"])
        .assert()
        .success()
        .stdout(contains("Clearing configuration"));

    assert!(!config_path.exists());
}

#[test]
/// Help is printed before the home directory is looked up.
fn cli_help_without_home_dir() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env_remove("HOME").args(["config", "--help"]);
    cmd.assert()
        .success()
        .stdout(contains("set-url"))
        .stdout(contains("clear"));
}

#[test]
/// A corrupt config file blocks backend commands but can still be cleared.
fn corrupt_config_only_blocks_backend_commands() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{not json").unwrap();

    command(&tmp)
        .args(["classical"])
        .assert()
        .failure()
        .stderr(contains("Failed to load config"));

    command(&tmp).args(["config", "clear"]).assert().success();
    assert!(!config_path.exists());
}

#[test]
/// Too few samples are rejected before any request is made.
fn fft_with_short_series_fails_validation() {
    let tmp = temp_home_dir();
    command(&tmp)
        .args(["fft", "--series", "1,2"])
        .assert()
        .failure()
        .stderr(contains("Need at least 8 samples"));
}

#[test]
fn simulate_with_mismatched_weights_fails_validation() {
    let tmp = temp_home_dir();
    command(&tmp)
        .args(["simulate", "--tickers", "AAPL,MSFT", "--weights", "1.0"])
        .assert()
        .failure()
        .stderr(contains("Got 1 weights for 2 tickers"));
}

#[test]
/// Nothing listens on the discard port, so the health check reports failure.
fn health_against_unreachable_backend_fails() {
    let tmp = temp_home_dir();
    command(&tmp)
        .args(["--api-url", "http://127.0.0.1:9", "health"])
        .assert()
        .failure()
        .stdout(contains("Backend unreachable"));
}
