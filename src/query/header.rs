//! Header validation and column resolution
//!
//! A header is an ordered set of unique text labels naming record
//! positions. An empty header is valid and disables named access.
//!
//! Column references are either a zero-based position or a label;
//! `resolve_column` is the only place a `ColumnRef` is interpreted.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{QueryError, QueryResult};

/// Field selector: a zero-based position or a header label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(i64),
    Name(String),
}

impl ColumnRef {
    pub fn index(i: i64) -> Self {
        ColumnRef::Index(i)
    }

    pub fn name(label: impl Into<String>) -> Self {
        ColumnRef::Name(label.into())
    }
}

impl Default for ColumnRef {
    fn default() -> Self {
        ColumnRef::Index(0)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "{}", i),
            ColumnRef::Name(label) => write!(f, "\"{}\"", label),
        }
    }
}

impl From<i32> for ColumnRef {
    fn from(i: i32) -> Self {
        ColumnRef::Index(i64::from(i))
    }
}

impl From<i64> for ColumnRef {
    fn from(i: i64) -> Self {
        ColumnRef::Index(i)
    }
}

impl From<usize> for ColumnRef {
    fn from(i: usize) -> Self {
        ColumnRef::Index(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<&str> for ColumnRef {
    fn from(label: &str) -> Self {
        ColumnRef::Name(label.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(label: String) -> Self {
        ColumnRef::Name(label)
    }
}

impl From<&ColumnRef> for ColumnRef {
    fn from(column: &ColumnRef) -> Self {
        column.clone()
    }
}

/// Validated header
///
/// Labels are shared, so every record produced under the same header
/// holds a cheap handle to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    labels: Arc<[String]>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            labels: Arc::from(Vec::new()),
        }
    }
}

impl Header {
    /// Creates a header, failing with a syntax error on duplicate labels
    pub fn new<I, S>(labels: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = validate_header(labels.into_iter().map(Into::into).collect())?;
        Ok(Self {
            labels: labels.into(),
        })
    }

    /// Creates a header from untyped values.
    ///
    /// Every element must be a JSON string.
    pub fn try_from_values(values: &[Value]) -> QueryResult<Self> {
        let labels = values
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Value::String(s) => Ok(s.clone()),
                other => Err(QueryError::syntax(format!(
                    "header element at position {} is not text: {}",
                    i, other
                ))),
            })
            .collect::<QueryResult<Vec<_>>>()?;
        Self::new(labels)
    }

    /// The empty header
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of `label`, if present
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Resolves `column` against this header
    pub fn resolve(&self, column: &ColumnRef) -> QueryResult<usize> {
        resolve_column(self, column)
    }
}

/// Validates a header sequence.
///
/// Fails with a syntax error if any label repeats. Returns the labels unchanged.
pub fn validate_header(labels: Vec<String>) -> QueryResult<Vec<String>> {
    let mut seen = HashSet::with_capacity(labels.len());
    for label in &labels {
        if !seen.insert(label.as_str()) {
            return Err(QueryError::syntax(format!(
                "the header contains duplicate label \"{}\"",
                label
            )));
        }
    }
    Ok(labels)
}

/// Resolves a column reference to a position.
///
/// - An index must be >= 0, and < header length when the header is non-empty.
/// - A name must occur in the header; an empty header has no names.
pub fn resolve_column(header: &Header, column: &ColumnRef) -> QueryResult<usize> {
    match column {
        ColumnRef::Index(i) => {
            let index = usize::try_from(*i)
                .map_err(|_| QueryError::invalid_argument("invalid column index"))?;
            if !header.is_empty() && index >= header.len() {
                return Err(QueryError::invalid_argument("invalid column index"));
            }
            Ok(index)
        }
        ColumnRef::Name(label) => header.position(label).ok_or_else(|| {
            QueryError::invalid_argument(format!("unknown column name \"{}\"", label))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn abc() -> Header {
        Header::new(["A", "B", "C"]).unwrap()
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let err = Header::new(["A", "B", "A"]).unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_non_text_element_rejected() {
        let err = Header::try_from_values(&[json!("A"), json!(1), json!("C")]).unwrap_err();
        assert!(err.is_syntax());

        let err = Header::try_from_values(&[json!("A"), json!(["nested"])]).unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_validate_returns_labels_unchanged() {
        let labels = vec!["x".to_string(), "y".to_string()];
        assert_eq!(validate_header(labels.clone()).unwrap(), labels);
    }

    #[test]
    fn test_empty_header_is_valid() {
        let header = Header::new(Vec::<String>::new()).unwrap();
        assert!(header.is_empty());
        assert_eq!(header, Header::empty());
    }

    #[test]
    fn test_resolve_index() {
        let header = abc();
        assert_eq!(resolve_column(&header, &ColumnRef::Index(0)).unwrap(), 0);
        assert_eq!(resolve_column(&header, &ColumnRef::Index(2)).unwrap(), 2);
        assert!(resolve_column(&header, &ColumnRef::Index(3))
            .unwrap_err()
            .is_invalid_argument());
        assert!(resolve_column(&header, &ColumnRef::Index(-1))
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_resolve_index_without_header_is_unbounded() {
        let header = Header::empty();
        assert_eq!(resolve_column(&header, &ColumnRef::Index(42)).unwrap(), 42);
        assert!(resolve_column(&header, &ColumnRef::Index(-3)).is_err());
    }

    #[test]
    fn test_resolve_name() {
        let header = abc();
        assert_eq!(resolve_column(&header, &ColumnRef::name("B")).unwrap(), 1);
        assert!(resolve_column(&header, &ColumnRef::name("Z"))
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_resolve_name_without_header_fails() {
        let err = resolve_column(&Header::empty(), &ColumnRef::name("A")).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_column_ref_from_json() {
        let by_index: ColumnRef = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(by_index, ColumnRef::Index(2));

        let by_name: ColumnRef = serde_json::from_value(json!("E-mail")).unwrap();
        assert_eq!(by_name, ColumnRef::name("E-mail"));
    }
}
