//! Predicate filtering for statements
//!
//! Predicates are combined with AND semantics and evaluated in the order
//! they were added, stopping at the first one that rejects the record.
//!
//! `Filter` provides ready-made predicates over a single column. Text
//! comparisons are lexicographic with no coercion; the numeric operators
//! parse the field as `f64` and never match a value that does not parse.
//! A missing field never matches.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::header::ColumnRef;
use super::record::Record;

/// Caller-supplied record predicate
pub type RecordPredicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Evaluates predicate chains against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record matches all predicates
    pub fn matches(record: &Record, predicates: &[RecordPredicate]) -> bool {
        predicates.iter().all(|pred| pred(record))
    }
}

/// Filter operation types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FilterOp {
    /// field = value
    Eq(String),
    /// field != value
    Ne(String),
    /// field > value (text)
    Gt(String),
    /// field >= value (text)
    Gte(String),
    /// field < value (text)
    Lt(String),
    /// field <= value (text)
    Lte(String),
    /// field contains value as a substring
    Contains(String),
    /// field > value (numeric)
    GtNum(f64),
    /// field >= value (numeric)
    GteNum(f64),
    /// field < value (numeric)
    LtNum(f64),
    /// field <= value (numeric)
    LteNum(f64),
}

impl FilterOp {
    fn matches_value(&self, actual: &str) -> bool {
        match self {
            FilterOp::Eq(expected) => actual == expected,
            FilterOp::Ne(expected) => actual != expected,
            FilterOp::Gt(bound) => actual > bound.as_str(),
            FilterOp::Gte(bound) => actual >= bound.as_str(),
            FilterOp::Lt(bound) => actual < bound.as_str(),
            FilterOp::Lte(bound) => actual <= bound.as_str(),
            FilterOp::Contains(needle) => actual.contains(needle.as_str()),
            FilterOp::GtNum(bound) => parse_number(actual).is_some_and(|a| a > *bound),
            FilterOp::GteNum(bound) => parse_number(actual).is_some_and(|a| a >= *bound),
            FilterOp::LtNum(bound) => parse_number(actual).is_some_and(|a| a < *bound),
            FilterOp::LteNum(bound) => parse_number(actual).is_some_and(|a| a <= *bound),
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// A single-column filter (column + operation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Column the operation applies to
    pub column: ColumnRef,
    /// Filter operation
    #[serde(flatten)]
    pub op: FilterOp,
}

impl Filter {
    pub fn new(column: impl Into<ColumnRef>, op: FilterOp) -> Self {
        Self {
            column: column.into(),
            op,
        }
    }

    pub fn eq(column: impl Into<ColumnRef>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Eq(value.into()))
    }

    pub fn ne(column: impl Into<ColumnRef>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Ne(value.into()))
    }

    pub fn gt(column: impl Into<ColumnRef>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Gt(value.into()))
    }

    pub fn gte(column: impl Into<ColumnRef>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Gte(value.into()))
    }

    pub fn lt(column: impl Into<ColumnRef>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Lt(value.into()))
    }

    pub fn lte(column: impl Into<ColumnRef>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Lte(value.into()))
    }

    pub fn contains(column: impl Into<ColumnRef>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Contains(value.into()))
    }

    pub fn gt_num(column: impl Into<ColumnRef>, value: f64) -> Self {
        Self::new(column, FilterOp::GtNum(value))
    }

    pub fn gte_num(column: impl Into<ColumnRef>, value: f64) -> Self {
        Self::new(column, FilterOp::GteNum(value))
    }

    pub fn lt_num(column: impl Into<ColumnRef>, value: f64) -> Self {
        Self::new(column, FilterOp::LtNum(value))
    }

    pub fn lte_num(column: impl Into<ColumnRef>, value: f64) -> Self {
        Self::new(column, FilterOp::LteNum(value))
    }

    /// Checks if a record matches this filter
    pub fn matches(&self, record: &Record) -> bool {
        match record.get_ref(&self.column) {
            Some(actual) => self.op.matches_value(actual),
            None => false,
        }
    }

    /// Converts the filter into a record predicate
    pub fn into_predicate(self) -> RecordPredicate {
        Arc::new(move |record: &Record| self.matches(record))
    }
}
