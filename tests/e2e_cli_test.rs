//! E2E tests for the figjson binary.
//!
//! Covers:
//! - `resolve` output and invalid URL exit codes
//! - Token save / show / delete against a temp file store
//! - `get` against a mock API, to stdout and to a file
//! - Robot-mode errors and config failures

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use figjson::core::TOKEN_HEADER;
use figjson::test_utils::{
    DESIGN_URL, FILE_URL, NOT_FIGMA_URL, TEST_TOKEN, TestDir, make_test_error_response,
};

mod common;

use common::logger::TestLogger;

/// A figjson command isolated from the user's config, token and environment.
#[allow(deprecated)]
fn figjson(dir: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin("figjson").unwrap();
    cmd.env("FIGJSON_CONFIG", dir.config_file())
        .env("FIGJSON_STORE_FILE", dir.store_file())
        .env("FIGJSON_STORAGE", "file")
        .env("NO_COLOR", "1")
        .env_remove("FIGJSON_TOKEN")
        .env_remove("FIGJSON_API_BASE")
        .env_remove("FIGJSON_TIMEOUT")
        .env_remove("FIGJSON_FORMAT")
        .env_remove("FIGJSON_LOG")
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolve_design_url() {
    let log = TestLogger::new("resolve_design_url");
    let dir = TestDir::new();

    log.phase("execute");
    figjson(&dir)
        .args(["resolve", DESIGN_URL])
        .assert()
        .success()
        .stdout("file: FILEID\nnode: 12%3A34\n");
    log.finish_ok();
}

#[test]
fn resolve_file_url_as_json() {
    let dir = TestDir::new();
    let output = figjson(&dir)
        .args(["--json", "resolve", FILE_URL])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["fileId"], "FILEID");
    assert_eq!(value["nodeId"], "5-6");
}

#[test]
fn resolve_rejects_non_figma_url() {
    let dir = TestDir::new();
    figjson(&dir)
        .args(["resolve", NOT_FIGMA_URL])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid Figma URL format"))
        .stderr(predicate::str::contains("FIGJSON-F001"));
}

// =============================================================================
// token
// =============================================================================

#[test]
fn token_save_show_delete_cycle() {
    let log = TestLogger::new("token_save_show_delete_cycle");
    let dir = TestDir::new();

    log.phase("save");
    figjson(&dir)
        .args(["token", "save", TEST_TOKEN])
        .assert()
        .success()
        .stderr(predicate::str::contains("Token saved successfully!"));
    assert!(dir.store_file().exists());

    log.phase("show");
    figjson(&dir)
        .args(["token", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("figd").and(predicate::str::contains(TEST_TOKEN).not()));
    figjson(&dir)
        .args(["token", "show", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains(TEST_TOKEN));

    log.phase("delete");
    figjson(&dir)
        .args(["token", "delete"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Token deleted successfully!"));
    figjson(&dir)
        .args(["token", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No token saved (file)"));
    log.finish_ok();
}

#[test]
fn token_save_reads_stdin() {
    let dir = TestDir::new();
    figjson(&dir)
        .args(["token", "save"])
        .write_stdin(format!("{TEST_TOKEN}\n"))
        .assert()
        .success();
    figjson(&dir)
        .args(["--json", "token", "show", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("\"token\": \"{TEST_TOKEN}\"")));
}

#[test]
fn token_save_repairs_truncated_store() {
    let dir = TestDir::new();
    dir.create_file("data/token-store.json", r#"{"figmaToken": "abc"#);

    figjson(&dir)
        .args(["token", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("corrupt"));
    figjson(&dir)
        .args(["token", "save", TEST_TOKEN])
        .assert()
        .success()
        .stderr(predicate::str::contains("Token saved successfully!"));
    figjson(&dir)
        .args(["token", "show", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains(TEST_TOKEN))
        .stderr(predicate::str::contains("corrupt").not());
}

#[test]
fn token_delete_without_token_fails() {
    let dir = TestDir::new();
    figjson(&dir)
        .args(["token", "delete"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("FIGJSON-C002"));
}

// =============================================================================
// get
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn get_prints_document_to_stdout() {
    let log = TestLogger::new("get_prints_document_to_stdout");
    log.phase("setup");

    let dir = TestDir::new();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/FILEID/nodes"))
        .and(header(TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"b":1,"a":2}"#))
        .expect(1)
        .mount(&server)
        .await;

    log.phase("execute");
    let uri = server.uri();
    let mut cmd = figjson(&dir);
    cmd.args(["get", DESIGN_URL, "--token", TEST_TOKEN, "--api-base", uri.as_str()]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    log.phase("verify");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "{\n  \"b\": 1,\n  \"a\": 2\n}\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("JSON fetched successfully!"));
    assert!(!dir.store_file().exists(), "--token must not be persisted");
    log.finish_ok();
}

#[tokio::test(flavor = "multi_thread")]
async fn get_with_saved_token_writes_output_file() {
    let dir = TestDir::new();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/FILEID/nodes"))
        .and(header(TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"nodes":{}}"#))
        .mount(&server)
        .await;

    figjson(&dir)
        .args(["token", "save", TEST_TOKEN])
        .assert()
        .success();

    let out_path = dir.path().join("selection.json");
    let mut cmd = figjson(&dir);
    cmd.env("FIGJSON_API_BASE", server.uri())
        .arg("get")
        .arg(FILE_URL)
        .arg("--output")
        .arg(&out_path);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
    assert_eq!(dir.read_file("selection.json").unwrap(), "{\n  \"nodes\": {}\n}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_surfaces_api_message_in_json_mode() {
    let dir = TestDir::new();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403).set_body_string(make_test_error_response("Invalid token")),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let mut cmd = figjson(&dir);
    cmd.args(["--json", "get", DESIGN_URL, "--token", "bad", "--api-base", uri.as_str()]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(5));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .find(|line| line.starts_with("{\"error\""))
        .expect("json error line");
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(value["error"]["message"], "Invalid token");
    assert_eq!(value["error"]["status"], 403);
    assert_eq!(value["error"]["kind"], "remote_application");
}

#[test]
fn get_without_token_fails_before_network() {
    let dir = TestDir::new();
    figjson(&dir)
        .args(["get", DESIGN_URL, "--api-base", "http://127.0.0.1:1"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());
}

#[test]
fn get_unreachable_api_is_network_error() {
    let dir = TestDir::new();
    figjson(&dir)
        .args(["get", DESIGN_URL, "--token", TEST_TOKEN, "--api-base", "http://127.0.0.1:1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Error fetching JSON"))
        .stderr(predicate::str::contains(TEST_TOKEN).not());
}

// =============================================================================
// config and misc
// =============================================================================

#[test]
fn corrupt_config_is_a_config_error() {
    let dir = TestDir::new();
    dir.create_file("config.toml", "this is [not toml");
    figjson(&dir)
        .args(["resolve", DESIGN_URL])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("FIGJSON-C001"));
}

#[test]
fn out_of_range_timeout_is_rejected() {
    let dir = TestDir::new();
    figjson(&dir)
        .args(["get", DESIGN_URL, "--token", TEST_TOKEN, "--timeout", "0"])
        .assert()
        .code(3);
}

#[test]
fn no_command_prints_quickstart() {
    let dir = TestDir::new();
    figjson(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("figjson token save"));
}

#[test]
#[allow(deprecated)]
fn version_flag() {
    Command::cargo_bin("figjson")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
