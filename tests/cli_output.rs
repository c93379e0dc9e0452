//! CLI Output Tests
//!
//! The `rowlayout` binary prints exactly one JSON value on stdout. Log lines
//! go to stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write(dir: &TempDir, file: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rowlayout"))
        .args(args)
        .output()
        .unwrap()
}

fn compile(path: &Path) -> Output {
    run(&["compile", "--file", path.to_str().unwrap()])
}

/// Whole stdout as a single JSON value
fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(stdout.trim_end()).unwrap()
}

/// Columns `a` and `b` share a position and `my col` is a natural name
const WARNS: &str = r#"{
    "name": "warns",
    "columns": {
        "a":      {"type": "Int32", "pos": 1},
        "b":      {"type": "Int32", "pos": 1},
        "my col": {"type": "Float64"}
    }
}"#;

// =============================================================================
// Stdout Tests
// =============================================================================

/// Warnings during compile leave stdout as one JSON response.
#[test]
fn test_warnings_stay_off_stdout() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "warns.json", WARNS);

    let output = compile(&path);
    assert!(output.status.success());

    let response = stdout_json(&output);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["data"]["name"], "warns");
    assert_eq!(response["data"]["schema"]["names"], serde_json::json!(["a", "b", "my col"]));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("DUPLICATE_POSITION"));
    assert!(stderr.contains("NATURAL_NAME"));
    for line in stderr.lines() {
        let _: Value = serde_json::from_str(line).unwrap();
    }
}

/// Trace events under --verbose go to stderr too.
#[test]
fn test_verbose_keeps_stdout_clean() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "warns.json", WARNS);

    let output = run(&["--verbose", "compile", "--file", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "ok");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("SCHEMA_COMPILED"));
}

/// A failed compile prints one JSON error response and exits non-zero.
#[test]
fn test_error_response_on_stdout() {
    let temp = TempDir::new().unwrap();
    let output = compile(&temp.path().join("missing.json"));
    assert!(!output.status.success());

    let response = stdout_json(&output);
    assert_eq!(response["status"], "error");
    assert_eq!(response["code"], "ROWLAYOUT_MALFORMED_SCHEMA_FILE");
}

/// A directory load with warnings still prints one JSON response.
#[test]
fn test_load_output_is_single_json() {
    let temp = TempDir::new().unwrap();
    write(&temp, "warns.json", WARNS);
    write(&temp, "plain.json", r#"{"name": "plain", "columns": {"x": {"type": "Int8"}}}"#);

    let output = run(&["load", "--dir", temp.path().to_str().unwrap()]);
    assert!(output.status.success());

    let response = stdout_json(&output);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["data"]["schemas"].as_array().unwrap().len(), 2);
}
