//! JSON I/O handling for CLI
//!
//! - Input: a JSON array of rows, each row an array of scalars
//! - Output: a single JSON object via stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read rows from a JSON file
pub fn read_rows(path: &Path) -> CliResult<Vec<Vec<String>>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;
    let value: Value = serde_json::from_str(&content)?;
    rows_from_json(value)
}

/// Converts a JSON array of scalar arrays to text rows.
///
/// Strings pass through, numbers and booleans use their JSON spelling and
/// null becomes the empty string.
pub fn rows_from_json(value: Value) -> CliResult<Vec<Vec<String>>> {
    let Value::Array(rows) = value else {
        return Err(CliError::input_error("rows must be a JSON array"));
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Array(fields) => fields
                .into_iter()
                .map(|field| match field {
                    Value::String(s) => Ok(s),
                    Value::Number(n) => Ok(n.to_string()),
                    Value::Bool(b) => Ok(b.to_string()),
                    Value::Null => Ok(String::new()),
                    other => Err(CliError::input_error(format!(
                        "row {} contains a non-scalar field: {}",
                        i, other
                    ))),
                })
                .collect::<CliResult<Vec<String>>>(),
            other => Err(CliError::input_error(format!(
                "row {} is not an array: {}",
                i, other
            ))),
        })
        .collect()
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
