//! Query statements
//!
//! A `Statement` is an immutable description of what to do with a record
//! stream: filter, order, skip, take. Builder methods never mutate the
//! receiver, so one statement can be reused to build many result sets.
//!
//! # Processing order (strict)
//!
//! 1. Resolve the effective header (caller-supplied, else the source's)
//! 2. Stream records from the source
//! 3. Keep records matching every predicate, in declaration order
//! 4. Apply the composite ordering, if any (stable)
//! 5. Skip `offset` records, then take at most `limit`

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event};

use super::errors::{QueryError, QueryResult};
use super::filters::{Filter, RecordPredicate};
use super::header::Header;
use super::record::Record;
use super::result::ResultSet;
use super::sorter::{RecordComparator, SortSpec};
use super::source::RecordSource;

/// Immutable query specification
#[derive(Clone, Default)]
pub struct Statement {
    predicates: Vec<RecordPredicate>,
    order_by: Vec<RecordComparator>,
    offset: usize,
    limit: Option<usize>,
}

impl Statement {
    /// Creates an empty statement: no filter, source order, no pagination
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a statement with `predicate` appended
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.with_predicate(Arc::new(predicate))
    }

    /// Returns a statement with a ready-made column filter appended
    pub fn filter_by(&self, filter: Filter) -> Self {
        self.with_predicate(filter.into_predicate())
    }

    pub fn with_predicate(&self, predicate: RecordPredicate) -> Self {
        let mut next = self.clone();
        next.predicates.push(predicate);
        next
    }

    /// Returns a statement with `comparator` appended.
    ///
    /// It only decides between records every earlier comparator ranks equal.
    pub fn order_by<F>(&self, comparator: F) -> Self
    where
        F: Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    {
        self.with_comparator(Arc::new(comparator))
    }

    /// Returns a statement with a ready-made column ordering appended
    pub fn order_by_spec(&self, spec: SortSpec) -> Self {
        self.with_comparator(spec.into_comparator())
    }

    pub fn with_comparator(&self, comparator: RecordComparator) -> Self {
        let mut next = self.clone();
        next.order_by.push(comparator);
        next
    }

    /// Returns a statement that skips the first `n` records.
    ///
    /// Fails with an invalid argument error if `n` is negative.
    pub fn offset(&self, n: i64) -> QueryResult<Self> {
        let offset = usize::try_from(n).map_err(|_| {
            reject(format!("the offset must be a positive integer or 0, got {}", n))
        })?;
        Ok(Self {
            offset,
            ..self.clone()
        })
    }

    /// Returns a statement that yields at most `n` records; -1 removes the cap.
    ///
    /// Fails with an invalid argument error if `n` is below -1.
    pub fn limit(&self, n: i64) -> QueryResult<Self> {
        let limit = match n {
            -1 => None,
            n => Some(usize::try_from(n).map_err(|_| {
                reject(format!("the limit must be greater or equal to -1, got {}", n))
            })?),
        };
        Ok(Self {
            limit,
            ..self.clone()
        })
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }

    /// Configured limit, -1 when unbounded
    pub fn get_limit(&self) -> i64 {
        self.limit
            .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
            .unwrap_or(-1)
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    pub fn comparator_count(&self) -> usize {
        self.order_by.len()
    }

    pub(crate) fn predicates(&self) -> &[RecordPredicate] {
        &self.predicates
    }

    pub(crate) fn comparators(&self) -> &[RecordComparator] {
        &self.order_by
    }

    pub(crate) fn skip(&self) -> usize {
        self.offset
    }

    pub(crate) fn take(&self) -> Option<usize> {
        self.limit
    }

    /// Applies the statement to `source` using the source's own header
    pub fn process<'a, S>(&self, source: S) -> QueryResult<ResultSet<'a>>
    where
        S: RecordSource + 'a,
    {
        self.process_with_header(source, Vec::<String>::new())
    }

    /// Applies the statement to `source` under a caller-supplied header.
    ///
    /// A non-empty `header` is validated before any record is read and
    /// replaces the source's header; an empty one defers to the source.
    pub fn process_with_header<'a, S, I, T>(&self, source: S, header: I) -> QueryResult<ResultSet<'a>>
    where
        S: RecordSource + 'a,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let labels: Vec<String> = header.into_iter().map(Into::into).collect();
        let header = if labels.is_empty() {
            source.header()
        } else {
            Header::new(labels).map_err(|e| {
                log_event_with_fields(Event::HeaderRejected, &[("reason", e.message())]);
                e
            })?
        };

        let predicates = self.predicates.len().to_string();
        let comparators = self.order_by.len().to_string();
        let offset = self.offset.to_string();
        let limit = self.get_limit().to_string();
        let header_len = header.len().to_string();
        log_event_with_fields(
            Event::QueryBegin,
            &[
                ("predicates", predicates.as_str()),
                ("comparators", comparators.as_str()),
                ("offset", offset.as_str()),
                ("limit", limit.as_str()),
                ("header_len", header_len.as_str()),
            ],
        );

        Ok(ResultSet::new(Box::new(source), header, self.clone()))
    }
}

fn reject(reason: String) -> QueryError {
    log_event_with_fields(Event::ArgumentRejected, &[("reason", reason.as_str())]);
    QueryError::invalid_argument(reason)
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("predicates", &self.predicates.len())
            .field("order_by", &self.order_by.len())
            .field("offset", &self.offset)
            .field("limit", &self.get_limit())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_does_not_mutate_receiver() {
        let base = Statement::new();
        let filtered = base.filter(|_| true);
        let ordered = filtered.order_by(|_, _| Ordering::Equal);

        assert_eq!(base.predicate_count(), 0);
        assert_eq!(filtered.predicate_count(), 1);
        assert_eq!(filtered.comparator_count(), 0);
        assert_eq!(ordered.predicate_count(), 1);
        assert_eq!(ordered.comparator_count(), 1);
    }

    #[test]
    fn test_offset_validation() {
        let stmt = Statement::new();
        assert_eq!(stmt.offset(3).unwrap().get_offset(), 3);
        assert_eq!(stmt.offset(0).unwrap().get_offset(), 0);
        assert!(stmt.offset(-1).unwrap_err().is_invalid_argument());
        assert_eq!(stmt.get_offset(), 0);
    }

    #[test]
    fn test_limit_validation() {
        let stmt = Statement::new();
        assert_eq!(stmt.get_limit(), -1);
        assert_eq!(stmt.limit(5).unwrap().get_limit(), 5);
        assert_eq!(stmt.limit(0).unwrap().get_limit(), 0);
        assert_eq!(stmt.limit(5).unwrap().limit(-1).unwrap().get_limit(), -1);
        assert!(stmt.limit(-2).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_debug_shows_counts() {
        let stmt = Statement::new().filter(|_| true).limit(2).unwrap();
        let debug = format!("{:?}", stmt);
        assert!(debug.contains("predicates: 1"));
        assert!(debug.contains("limit: 2"));
    }
}
