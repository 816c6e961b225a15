mod common;

use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use spendboard::cli::SCRIPT_MODE_ENV;
use spendboard::config::API_URL_ENV;
use spendboard_config::manager::CONFIG_DIR_ENV;
use wiremock::MockServer;

use common::{mount_record_store, temp_config_dir};

const BIN_NAME: &str = "spendboard_cli";
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

fn script_command(config_dir: &Path, api: &str) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env(SCRIPT_MODE_ENV, "1")
        .env(CONFIG_DIR_ENV, config_dir)
        .env(API_URL_ENV, api)
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_help_command_prints_overview() {
    script_command(&temp_config_dir(), UNREACHABLE_API)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("toggle"));
}

#[test]
fn cli_version_command_prints_version_info() {
    script_command(&temp_config_dir(), UNREACHABLE_API)
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(contains("Spendboard"));
}

#[test]
fn unreachable_store_still_renders_the_empty_dashboard() {
    script_command(&temp_config_dir(), UNREACHABLE_API)
        .write_stdin("show\nexit\n")
        .assert()
        .success()
        .stderr(contains("Could not load dashboard data"))
        .stdout(contains("No categories found for the selected period."));
}

#[test]
fn unknown_commands_are_reported_without_exiting() {
    script_command(&temp_config_dir(), UNREACHABLE_API)
        .write_stdin("shwo\nversion\nexit\n")
        .assert()
        .success()
        .stderr(contains("Unknown command `shwo`"))
        .stdout(contains("Suggestion: `show`?"))
        .stdout(contains("Spendboard"));
}

#[test]
fn inverted_range_is_rejected() {
    script_command(&temp_config_dir(), UNREACHABLE_API)
        .write_stdin("range 2024-03-10 2024-03-01\nexit\n")
        .assert()
        .success()
        .stderr(contains("after"));
}

#[test]
fn config_changes_are_persisted() {
    let dir = temp_config_dir();
    script_command(&dir, UNREACHABLE_API)
        .write_stdin("config set top_items 3\nconfig show\nexit\n")
        .assert()
        .success()
        .stdout(contains("top_items            : 3"));

    let saved = std::fs::read_to_string(dir.join("spendboard.json")).expect("config written");
    assert!(saved.contains("\"top_items\": 3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn dashboard_renders_records_from_the_store() {
    let server = MockServer::start().await;
    mount_record_store(&server).await;
    let api = format!("{}/api", server.uri());
    let dir = temp_config_dir();

    tokio::task::spawn_blocking(move || {
        script_command(&dir, &api)
            .write_stdin("show\ntoggle transport\ncategories\nexit\n")
            .assert()
            .success()
            .stdout(contains("Spent vs. limit"))
            .stdout(contains("Food"))
            .stdout(contains("PIX"))
            .stdout(contains("Deselected Transport."))
            .stdout(contains("[ ]"));
    })
    .await
    .expect("cli task");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_categories_are_rejected_with_a_suggestion() {
    let server = MockServer::start().await;
    mount_record_store(&server).await;
    let api = format!("{}/api", server.uri());
    let dir = temp_config_dir();

    tokio::task::spawn_blocking(move || {
        script_command(&dir, &api)
            .write_stdin("select fod\ntoggle fod\nselect food food\ncategories\nexit\n")
            .assert()
            .success()
            .stderr(contains("unknown category `fod` (did you mean `food`?)"))
            .stdout(contains("1 categories selected."))
            .stdout(contains("[ ]"));
    })
    .await
    .expect("cli task");
}

#[test]
fn restoring_an_invalid_backup_keeps_the_current_config() {
    let dir = temp_config_dir();
    let backups = dir.join("backups");
    std::fs::create_dir_all(&backups).expect("backups dir");
    std::fs::write(
        backups.join("20240301T000000_broken.json"),
        r#"{"api_base_url":"http://127.0.0.1:9/api","page_size":0}"#,
    )
    .expect("write backup");

    script_command(&dir, UNREACHABLE_API)
        .write_stdin("config restore 20240301T000000_broken.json\nconfig show\nexit\n")
        .assert()
        .success()
        .stderr(contains("page_size"))
        .stdout(contains("page_size            : 1000"));
}
