//! CLI Output Tests
//!
//! - stdout carries exactly one JSON document, whatever the log level
//! - log lines only ever reach stderr
//! - every failure, including argument setup, uses the error envelope

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_rows(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("rows.json");
    fs::write(
        &path,
        r#"[["name","2024"],["ann","12"],["bob","7"]]"#,
    )
    .unwrap();
    path
}

fn tabquery(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tabquery"))
        .args(args)
        .output()
        .unwrap()
}

/// Parses stdout, requiring exactly one JSON value
fn single_document(output: &Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    let mut values = serde_json::Deserializer::from_str(&stdout).into_iter::<Value>();
    let first = values.next().expect("no JSON on stdout").unwrap();
    assert!(values.next().is_none(), "extra output on stdout: {}", stdout);
    first
}

// =============================================================================
// Log Routing
// =============================================================================

#[test]
fn test_trace_logging_keeps_stdout_clean() {
    let tmp = TempDir::new().unwrap();
    let rows = write_rows(&tmp);

    let output = tabquery(&[
        "--log-level",
        "trace",
        "query",
        "--rows",
        rows.to_str().unwrap(),
        "--header-offset",
        "0",
        "--count",
    ]);

    assert!(output.status.success());
    let response = single_document(&output);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["data"], 2);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("QUERY_BEGIN"));
    assert!(stderr.contains("QUERY_COMPLETE"));
}

// =============================================================================
// Error Envelope
// =============================================================================

#[test]
fn test_unknown_log_level_uses_error_envelope() {
    let tmp = TempDir::new().unwrap();
    let rows = write_rows(&tmp);

    let output = tabquery(&[
        "--log-level",
        "verbose",
        "query",
        "--rows",
        rows.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let response = single_document(&output);
    assert_eq!(response["status"], "error");
    assert_eq!(response["code"], "TABQUERY_CLI_CONFIG_ERROR");
}

// =============================================================================
// Column Selection
// =============================================================================

#[test]
fn test_numeric_label_selected_by_name() {
    let tmp = TempDir::new().unwrap();
    let rows = write_rows(&tmp);

    let output = tabquery(&[
        "query",
        "--rows",
        rows.to_str().unwrap(),
        "--header-offset",
        "0",
        "--column",
        "2024",
    ]);

    let response = single_document(&output);
    assert_eq!(response["data"], serde_json::json!(["12", "7"]));
}
