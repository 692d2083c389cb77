//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::query::QueryError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// Input rows are not a JSON array of scalar arrays
    InputError,
    /// Statement or result set rejected the request
    QueryError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TABQUERY_CLI_CONFIG_ERROR",
            Self::IoError => "TABQUERY_CLI_IO_ERROR",
            Self::InputError => "TABQUERY_CLI_INPUT_ERROR",
            Self::QueryError => "TABQUERY_CLI_QUERY_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Input error
    pub fn input_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InputError, msg)
    }

    /// Query error
    pub fn query_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::QueryError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        Self::query_error(format!("{}: {}", e.code(), e.message()))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Query(q) => q.into(),
            other => Self::config_error(other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_conversion() {
        let err: CliError = QueryError::invalid_argument("invalid column index").into();
        assert_eq!(err.code(), &CliErrorCode::QueryError);
        assert!(err.message().contains("TABQUERY_INVALID_ARGUMENT"));
    }

    #[test]
    fn test_config_query_error_keeps_query_code() {
        let err: CliError = ConfigError::Query(QueryError::syntax("duplicate")).into();
        assert_eq!(err.code_str(), "TABQUERY_CLI_QUERY_ERROR");
    }

    #[test]
    fn test_display() {
        let err = CliError::input_error("rows must be an array");
        assert_eq!(
            err.to_string(),
            "TABQUERY_CLI_INPUT_ERROR: rows must be an array"
        );
    }
}
