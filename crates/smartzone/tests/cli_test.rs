//! Integration tests for the `smartzone` CLI binary.
//!
//! Argument parsing, help output, completions, config handling and error
//! exit codes, plus full sessions against a mock controller.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/wsg/api/public/v8_1";
const TICKET: &str = "ST-cli-test";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `smartzone` binary with env isolation.
///
/// Clears all `SMARTZONE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn sz_cmd() -> assert_cmd::Command {
    sz_cmd_with_home("/tmp/smartzone-cli-test-nonexistent")
}

fn sz_cmd_with_home(home: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("smartzone");
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home);
    for var in [
        "SMARTZONE_PROFILE",
        "SMARTZONE_HOST",
        "SMARTZONE_CONTROLLER",
        "SMARTZONE_USERNAME",
        "SMARTZONE_PASSWORD",
        "SMARTZONE_API_VERSION",
        "SMARTZONE_OUTPUT",
        "SMARTZONE_INSECURE",
        "SMARTZONE_TIMEOUT",
        "SMARTZONE_DEFAULT_PROFILE",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mount_session(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("{API}/serviceTicket")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "serviceTicket": TICKET,
            "controllerVersion": "6.1.2.0.213"
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{API}/serviceTicket")))
        .and(query_param("serviceTicket", TICKET))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(server)
        .await;
}

/// Run the binary against `server` off the async runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut argv: Vec<String> = vec![
        "--controller".into(),
        format!("{}/", server.uri()),
        "-u".into(),
        "admin".into(),
        "--password".into(),
        "hunter2".into(),
    ];
    argv.extend(args.iter().map(|a| (*a).to_owned()));
    tokio::task::spawn_blocking(move || sz_cmd().args(&argv).output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = sz_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    sz_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("SmartZone")
            .and(predicate::str::contains("zones"))
            .and(predicate::str::contains("aps"))
            .and(predicate::str::contains("controller")),
    );
}

#[test]
fn test_version_flag() {
    sz_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("smartzone"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    sz_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("smartzone"));
}

#[test]
fn test_completions_zsh() {
    sz_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error handling ──────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = sz_cmd().arg("frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("frobnicate"));
}

#[test]
fn test_zones_list_without_controller() {
    let output = sz_cmd().args(["zones", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("No controller configured"),
        "Expected missing-controller error:\n{text}"
    );
}

#[test]
fn test_unknown_profile_is_reported() {
    let output = sz_cmd()
        .args(["--profile", "nope", "--password", "x", "controller"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Profile 'nope' not found"));
}

#[test]
fn test_unreachable_controller_is_a_connection_error() {
    let output = sz_cmd()
        .args([
            "--controller",
            "http://127.0.0.1:9/",
            "-u",
            "admin",
            "--password",
            "x",
            "--timeout",
            "5",
            "controller",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
}

#[test]
fn test_invalid_output_format() {
    let output = sz_cmd()
        .args(["--output", "xml", "zones", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("xml"));
}

// ── Subcommand tree ─────────────────────────────────────────────────

#[test]
fn test_aps_subcommands_exist() {
    sz_cmd().args(["aps", "--help"]).assert().success().stdout(
        predicate::str::contains("list")
            .and(predicate::str::contains("query"))
            .and(predicate::str::contains("lldp"))
            .and(predicate::str::contains("port"))
            .and(predicate::str::contains("reboot"))
            .and(predicate::str::contains("rename")),
    );
}

#[test]
fn test_config_subcommands_exist() {
    sz_cmd().args(["config", "--help"]).assert().success().stdout(
        predicate::str::contains("init")
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("set-password"))
            .and(predicate::str::contains("profiles")),
    );
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    sz_cmd()
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"default_profile\": \"default\""));
}

#[test]
fn test_config_path_points_into_config_home() {
    sz_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().to_str().unwrap();

    sz_cmd_with_home(home)
        .args(["config", "set", "host", "sz.lab.example"])
        .assert()
        .success();
    sz_cmd_with_home(home)
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .code(2);

    sz_cmd_with_home(home)
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sz.lab.example"));
    sz_cmd_with_home(home)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));
}

const LAB_CONFIG: &str = r#"default_profile = "lab"

[profiles.lab]
host = "sz-lab.example"

[profiles.prod]
host = "sz-prod.example"
"#;

fn write_config(home: &std::path::Path, contents: &str) -> std::path::PathBuf {
    let dir = home.join("smartzone");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_broken_config_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let broken = "default_profile = \"lab\"\n[profiles.lab\nhost = \"sz-lab.example\"\n";
    let path = write_config(dir.path(), broken);
    let home = dir.path().to_str().unwrap();

    let output = sz_cmd_with_home(home)
        .args(["config", "set", "username", "ops"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("config loading failed"));

    sz_cmd_with_home(home)
        .args(["config", "use", "lab"])
        .assert()
        .failure();
    sz_cmd_with_home(home)
        .args(["zones", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config loading failed"));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_config_set_does_not_persist_env_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), LAB_CONFIG);
    let home = dir.path().to_str().unwrap();

    sz_cmd_with_home(home)
        .env("SMARTZONE_DEFAULT_PROFILE", "prod")
        .env("SMARTZONE_DEFAULTS__TIMEOUT", "5")
        .args(["config", "set", "username", "ops"])
        .assert()
        .success()
        .stderr(predicate::str::contains("profile 'lab'"));

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("default_profile = \"lab\""), "{saved}");
    assert!(!saved.contains("timeout = 5\n"), "{saved}");
    assert!(saved.contains("sz-prod.example"), "{saved}");
    assert!(saved.contains("username = \"ops\""), "{saved}");
}

#[test]
fn test_config_use_unknown_profile() {
    sz_cmd()
        .args(["config", "use", "ghost"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ghost"));
}

// ── Full sessions against a mock controller ─────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_zones_list_runs_a_full_session() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/rkszones")))
        .and(query_param("serviceTicket", TICKET))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": 2,
            "hasMore": false,
            "firstIndex": 0,
            "list": [
                { "id": "z-1", "name": "HQ" },
                { "id": "z-2", "name": "Lab" }
            ]
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "plain", "zones", "list"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "z-1\nz-2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_command_still_logs_out() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/aps/2C:5D:93:00:00:01")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "AP not found",
            "errorCode": 301,
            "errorType": "Resource not found"
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["aps", "get", "2C:5D:93:00:00:01"]).await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_declined_reboot_exits_rejected() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    Mock::given(method("GET"))
        .and(path("/wsg/api/scg/aps/2C:5D:93:00:00:01/reboot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["--yes", "aps", "reboot", "2C:5D:93:00:00:01"]).await;
    assert_eq!(output.status.code(), Some(5), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reboot_without_tty_requires_yes() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    Mock::given(method("GET"))
        .and(path("/wsg/api/scg/aps/2C:5D:93:00:00:01/reboot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, &["aps", "reboot", "2C:5D:93:00:00:01"]).await;
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/serviceTicket")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid username or password",
            "errorCode": 201,
            "errorType": "Authentication failed"
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["controller"]).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}
