//! Statement Configuration Tests
//!
//! Loading statement descriptions from disk and applying them.

use std::fs;

use tabquery::config::{ConfigError, StatementConfig};
use tabquery::query::{MemorySource, QueryError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("statement.json");
    fs::write(&path, body).unwrap();
    path
}

fn scores() -> MemorySource {
    MemorySource::new(vec![
        vec!["name", "team", "score"],
        vec!["ann", "red", "12"],
        vec!["bob", "blue", "7"],
        vec!["cid", "red", "30"],
        vec!["dee", "blue", "7"],
        vec!["eve", "red", "9"],
    ])
    .with_header_offset(0)
    .unwrap()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_and_apply() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"{
            "filters": [{"column": "team", "op": "eq", "value": "red"}],
            "order_by": [{"column": "score", "direction": "desc", "numeric": true}],
            "limit": 2
        }"#,
    );

    let config = StatementConfig::load(&path).unwrap();
    let source = scores();
    let rs = config.process(&source).unwrap();

    let names: Vec<_> = rs.fetch_column("name").unwrap().collect();
    assert_eq!(names, ["cid", "ann"]);
}

#[test]
fn test_configured_header_replaces_source_header() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, r#"{"header": ["who", "side", "points"], "offset": 4}"#);

    let config = StatementConfig::load(&path).unwrap();
    let source = scores();
    let rs = config.process(&source).unwrap();

    assert_eq!(
        rs.json_serialize(),
        serde_json::json!([{"who": "eve", "side": "red", "points": "9"}])
    );
}

#[test]
fn test_tie_broken_by_second_ordering() {
    let config = StatementConfig::from_json(
        r#"{"order_by": [
            {"column": "score", "numeric": true},
            {"column": "name", "direction": "desc"}
        ]}"#,
    )
    .unwrap();
    let source = scores();
    let rs = config.process(&source).unwrap();

    let names: Vec<_> = rs.fetch_column(0usize).unwrap().collect();
    assert_eq!(names, ["dee", "bob", "eve", "ann", "cid"]);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_missing_file() {
    let tmp = TempDir::new().unwrap();
    let err = StatementConfig::load(&tmp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_json() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, "{ not json");
    assert!(matches!(
        StatementConfig::load(&path).unwrap_err(),
        ConfigError::Json(_)
    ));
}

#[test]
fn test_duplicate_header_label() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, r#"{"header": ["a", "b", "a"]}"#);
    assert!(matches!(
        StatementConfig::load(&path).unwrap_err(),
        ConfigError::Query(QueryError::Syntax(_))
    ));
}

#[test]
fn test_negative_offset() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, r#"{"offset": -1}"#);
    assert!(matches!(
        StatementConfig::load(&path).unwrap_err(),
        ConfigError::Query(QueryError::InvalidArgument(_))
    ));
}
