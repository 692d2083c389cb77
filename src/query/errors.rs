//! Query error types
//!
//! Error codes:
//! - TABQUERY_INVALID_ARGUMENT (REJECT)
//! - TABQUERY_SYNTAX_ERROR (REJECT)
//!
//! Both kinds describe caller programming errors. They are raised at the
//! call that detects the violation and are never retried.

use std::fmt;

use thiserror::Error;

/// Severity levels for query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Query-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Negative or out-of-range offset, limit, position or column reference
    InvalidArgument,
    /// Caller-supplied header failed validation
    SyntaxError,
}

impl QueryErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::InvalidArgument => "TABQUERY_INVALID_ARGUMENT",
            QueryErrorCode::SyntaxError => "TABQUERY_SYNTAX_ERROR",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("syntax error: {0}")]
    Syntax(String),
}

impl QueryError {
    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        QueryError::InvalidArgument(reason.into())
    }

    /// Create a syntax error
    pub fn syntax(reason: impl Into<String>) -> Self {
        QueryError::Syntax(reason.into())
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        match self {
            QueryError::InvalidArgument(_) => QueryErrorCode::InvalidArgument,
            QueryError::Syntax(_) => QueryErrorCode::SyntaxError,
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }

    /// Returns the error message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            QueryError::InvalidArgument(msg) | QueryError::Syntax(msg) => msg,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, QueryError::InvalidArgument(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, QueryError::Syntax(_))
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
