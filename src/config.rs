//! Declarative statement configuration
//!
//! A statement can be described as JSON:
//!
//! ```json
//! {
//!   "header": ["First Name", "Last Name", "E-mail"],
//!   "filters": [{"column": "Last Name", "op": "eq", "value": "doe"}],
//!   "order_by": [{"column": 0, "direction": "desc"}],
//!   "offset": 1,
//!   "limit": 1
//! }
//! ```
//!
//! Every field is optional. The header is kept as raw JSON values so that
//! a non-text label is reported as a syntax error rather than a parse error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::query::{
    Filter, Header, QueryError, QueryResult, RecordSource, ResultSet, SortSpec, Statement,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Statement configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatementConfig {
    /// Records to skip (default 0)
    #[serde(default)]
    pub offset: i64,

    /// Maximum records, -1 for no cap (default -1)
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Header labels; empty defers to the source's header
    #[serde(default)]
    pub header: Vec<Value>,

    /// Column orderings, earliest first
    #[serde(default)]
    pub order_by: Vec<SortSpec>,

    /// Column filters, combined with AND
    #[serde(default)]
    pub filters: Vec<Filter>,
}

fn default_limit() -> i64 {
    -1
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
            header: Vec::new(),
            order_by: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl StatementConfig {
    /// Parses configuration from a JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: StatementConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;

        let path_str = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_str.as_str())]);
        Ok(config)
    }

    /// Checks header labels and pagination bounds
    fn validate(&self) -> QueryResult<()> {
        self.header()?;
        self.to_statement()?;
        Ok(())
    }

    /// Validated header
    pub fn header(&self) -> QueryResult<Header> {
        Header::try_from_values(&self.header)
    }

    /// Builds the described statement through the regular builder methods
    pub fn to_statement(&self) -> QueryResult<Statement> {
        let mut statement = Statement::new();
        for filter in &self.filters {
            statement = statement.filter_by(filter.clone());
        }
        for spec in &self.order_by {
            statement = statement.order_by_spec(spec.clone());
        }
        statement.offset(self.offset)?.limit(self.limit)
    }

    /// Applies the described statement to `source`
    pub fn process<'a, S>(&self, source: S) -> QueryResult<ResultSet<'a>>
    where
        S: RecordSource + 'a,
    {
        let header = self.header()?;
        self.to_statement()?
            .process_with_header(source, header.labels().iter().cloned())
    }
}
