//! Integration tests for the `iotpanel` CLI binary.
//!
//! Argument parsing, help output and error exit codes run without a
//! backend; request tests run the binary against a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `iotpanel` binary with env isolation.
///
/// Clears all `IOTPANEL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn iotpanel_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("iotpanel");
    cmd.env("HOME", "/tmp/iotpanel-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/iotpanel-cli-test-nonexistent")
        .env_remove("IOTPANEL_PROFILE")
        .env_remove("IOTPANEL_BASE_URL")
        .env_remove("IOTPANEL_API_KEY")
        .env_remove("IOTPANEL_OUTPUT")
        .env_remove("IOTPANEL_TIMEOUT")
        .env_remove("IOTPANEL_LOG_FAILURES")
        .env_remove("RUST_LOG");
    cmd
}

/// Run the binary against `server` on a blocking thread.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut cmd = iotpanel_cmd();
    cmd.arg("--base-url").arg(server.uri()).args(args);
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
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
    let output = iotpanel_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    iotpanel_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("devices")
            .and(predicate::str::contains("temperature"))
            .and(predicate::str::contains("screenshot"))
            .and(predicate::str::contains("raw")),
    );
}

#[test]
fn test_version_flag() {
    iotpanel_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("iotpanel"));
}

#[test]
fn test_completions_bash() {
    iotpanel_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_manpage_for_subcommand() {
    iotpanel_cmd()
        .args(["manpage", "screenshot"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".TH").and(predicate::str::contains("upload")));
}

#[test]
fn test_manpage_unknown_subcommand_is_usage_error() {
    let output = iotpanel_cmd().args(["manpage", "bogus"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_config_path() {
    iotpanel_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_unknown_profile_is_usage_error() {
    let output = iotpanel_cmd()
        .args(["--profile", "nope", "health"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nope"));
}

#[test]
fn test_invalid_base_url_is_usage_error() {
    let output = iotpanel_cmd()
        .args(["--base-url", "not a url", "health"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("base_url"));
}

#[test]
fn test_malformed_header_is_rejected() {
    let output = iotpanel_cmd()
        .args(["--header", "no-separator", "health"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_update_requires_payload() {
    let output = iotpanel_cmd()
        .args(["devices", "update", "d1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--data"));
}

#[test]
fn test_connection_refused_exit_code() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let output = iotpanel_cmd()
        .args(["--base-url", &format!("http://127.0.0.1:{port}"), "health"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
}

// ── Requests against a mock backend ─────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_health_prints_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "json-compact", "health"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"status":"ok"}"#
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_temperature_list_with_device_and_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensor/temperature"))
        .and(query_param("device_id", "d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "device_id": "d1", "value": 21.5},
            {"id": 2, "device_id": "d1", "value": 21.7},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "-H",
            "X-API-Key: k",
            "-o",
            "plain",
            "temperature",
            "list",
            "--device",
            "d1",
        ],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1\n2");

    let request = &server.received_requests().await.unwrap()[0];
    assert_eq!(request.headers.get("x-api-key").unwrap(), "k");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such device"})))
        .mount(&server)
        .await;

    let output = run_against(&server, &["devices", "get", "ghost"]).await;

    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("no such device"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_screenshot_get_writes_file() {
    let server = MockServer::start().await;
    let image: &[u8] = b"\x89PNG\r\n\x1a\nrest";
    Mock::given(method("GET"))
        .and(path("/sensor/screenshot/12"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("shot.png");
    let out_arg = out.to_str().unwrap().to_owned();

    let output = run_against(&server, &["screenshot", "get", "12", "--out", &out_arg]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(std::fs::read(&out).unwrap(), image);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_screenshot_upload_sends_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sensor/screenshot"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("frame.jpg");
    std::fs::write(&image, b"JPEGBYTES").unwrap();
    let image_arg = image.to_str().unwrap().to_owned();

    let output = run_against(
        &server,
        &["screenshot", "upload", "--device", "cam1", "--image", &image_arg],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let request = &server.received_requests().await.unwrap()[0];
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"device_id\""));
    assert!(body.contains("name=\"format\""));
    assert!(body.contains("JPEGBYTES"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_raw_post_with_inline_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rooms"))
        .and(wiremock::matchers::body_json(json!({"name": "lab"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &["-o", "plain", "raw", "post", "/rooms", "--data", r#"{"name":"lab"}"#],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");
}
