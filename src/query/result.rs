//! Result sets
//!
//! A `ResultSet` is a factory for traversals rather than an iterator
//! itself: every call to `records` re-runs the statement's pipeline over
//! the source and yields the same records in the same order.
//!
//! # Laziness
//!
//! Without comparators the pipeline streams: a consumer that stops after k
//! records causes no further source reads or predicate calls. With any
//! comparator every filtered record must be seen before the first can be
//! emitted, so the filtered sequence is buffered, sorted, then paginated.
//! `count` always forces one full traversal and caches the result.

use std::cell::OnceCell;

use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};

use super::errors::{QueryError, QueryResult};
use super::filters::PredicateFilter;
use super::header::{ColumnRef, Header};
use super::record::Record;
use super::sorter::ResultSorter;
use super::source::{RecordSource, RowIter};
use super::statement::Statement;

/// Boxed record iterator borrowed from a result set
pub type RecordIter<'a> = Box<dyn Iterator<Item = Record> + 'a>;

/// Lazily evaluated, re-iterable outcome of a statement
pub struct ResultSet<'a> {
    source: Box<dyn RecordSource + 'a>,
    header: Header,
    statement: Statement,
    count: OnceCell<usize>,
}

impl<'a> ResultSet<'a> {
    pub(crate) fn new(source: Box<dyn RecordSource + 'a>, header: Header, statement: Statement) -> Self {
        Self {
            source,
            header,
            statement,
            count: OnceCell::new(),
        }
    }

    /// Effective header (possibly empty)
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Fresh traversal over the filtered, ordered and paginated records
    pub fn records(&self) -> RecordIter<'_> {
        let header = self.header.clone();
        let predicates = self.statement.predicates();
        let filtered = self
            .source
            .rows()
            .map(move |values| Record::new(header.clone(), values))
            .filter(move |record| PredicateFilter::matches(record, predicates));

        let comparators = self.statement.comparators();
        let ordered: RecordIter<'_> = if comparators.is_empty() {
            Box::new(filtered)
        } else {
            let mut buffered: Vec<Record> = filtered.collect();
            let buffered_len = buffered.len().to_string();
            log_event_with_fields(
                Event::QuerySortMaterialized,
                &[("records", buffered_len.as_str())],
            );
            ResultSorter::sort(&mut buffered, comparators);
            Box::new(buffered.into_iter())
        };

        let paged = ordered.skip(self.statement.skip());
        match self.statement.take() {
            Some(limit) => Box::new(paged.take(limit)),
            None => Box::new(paged),
        }
    }

    /// Alias of `records`
    pub fn iter(&self) -> RecordIter<'_> {
        self.records()
    }

    /// Number of records; computed by one full traversal, then cached
    pub fn count(&self) -> usize {
        *self.count.get_or_init(|| {
            let count = self.records().count();
            let count_str = count.to_string();
            log_event_with_fields(Event::QueryComplete, &[("records", count_str.as_str())]);
            count
        })
    }

    pub fn is_empty(&self) -> bool {
        self.records().next().is_none()
    }

    /// Returns the record at zero-based position `n`.
    ///
    /// A position beyond the available records yields an empty record.
    /// Fails with an invalid argument error if `n` is negative.
    pub fn fetch_one(&self, n: i64) -> QueryResult<Record> {
        let n = usize::try_from(n).map_err(|_| {
            reject(format!("the record position must be a positive integer or 0, got {}", n))
        })?;
        Ok(self
            .records()
            .nth(n)
            .unwrap_or_else(|| Record::empty(self.header.clone())))
    }

    /// Values of one column.
    ///
    /// Records that do not reach the resolved position are skipped, so the
    /// result can be shorter than `count`.
    pub fn fetch_column(
        &self,
        column: impl Into<ColumnRef>,
    ) -> QueryResult<impl Iterator<Item = String> + '_> {
        let index = self.resolve(&column.into())?;
        Ok(self
            .records()
            .filter_map(move |record| record.get(index).map(str::to_string)))
    }

    /// Key/value pairs taken from two columns.
    ///
    /// Records missing the key position are skipped; a missing value
    /// position yields `None`. Duplicate keys are all emitted in order.
    pub fn fetch_pairs(
        &self,
        key: impl Into<ColumnRef>,
        value: impl Into<ColumnRef>,
    ) -> QueryResult<impl Iterator<Item = (String, Option<String>)> + '_> {
        let key_index = self.resolve(&key.into())?;
        let value_index = self.resolve(&value.into())?;
        Ok(self.records().filter_map(move |record| {
            let key = record.get(key_index)?.to_string();
            let value = record.get(value_index).map(str::to_string);
            Some((key, value))
        }))
    }

    /// Structured export: one entry per record, keyed by label when the
    /// header is non-empty, a plain array of values otherwise
    pub fn json_serialize(&self) -> Value {
        Value::Array(self.records().map(|record| record.to_json()).collect())
    }

    fn resolve(&self, column: &ColumnRef) -> QueryResult<usize> {
        self.header.resolve(column).map_err(|e| {
            log_event_with_fields(Event::ArgumentRejected, &[("reason", e.message())]);
            e
        })
    }
}

fn reject(reason: String) -> QueryError {
    log_event_with_fields(Event::ArgumentRejected, &[("reason", reason.as_str())]);
    QueryError::invalid_argument(reason)
}

impl RecordSource for ResultSet<'_> {
    fn header(&self) -> Header {
        self.header.clone()
    }

    fn rows(&self) -> RowIter<'_> {
        Box::new(self.records().map(Record::into_values))
    }
}

impl<'s, 'a> IntoIterator for &'s ResultSet<'a> {
    type Item = Record;
    type IntoIter = RecordIter<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}

impl Serialize for ResultSet<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records())
    }
}

impl std::fmt::Debug for ResultSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultSet")
            .field("header", &self.header.labels())
            .field("statement", &self.statement)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::source::MemorySource;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn people() -> MemorySource {
        MemorySource::new(vec![
            vec!["john", "doe", "john.doe@example.com"],
            vec!["jane", "doe", "jane.doe@example.com"],
        ])
    }

    fn labels() -> [&'static str; 3] {
        ["First Name", "Last Name", "E-mail"]
    }

    #[test]
    fn test_records_are_reiterable() {
        let source = people();
        let rs = Statement::new().process(&source).unwrap();
        let first: Vec<_> = rs.records().collect();
        let second: Vec<_> = rs.iter().collect();
        assert_eq!(first, second);
        assert_eq!(rs.count(), first.len());
    }

    #[test]
    fn test_header_from_caller() {
        let source = people();
        let rs = Statement::new()
            .process_with_header(&source, labels())
            .unwrap();
        assert_eq!(rs.header().labels(), labels());
        assert_eq!(
            rs.fetch_one(0).unwrap().get_by_name("E-mail"),
            Some("john.doe@example.com")
        );
    }

    #[test]
    fn test_fetch_one_out_of_range_is_empty() {
        let source = people();
        let rs = Statement::new().process(&source).unwrap();
        assert!(rs.fetch_one(35).unwrap().is_empty());
        assert!(rs.fetch_one(-5).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_fetch_column_by_name_and_index() {
        let source = people();
        let rs = Statement::new()
            .process_with_header(&source, labels())
            .unwrap();
        let emails: Vec<_> = rs.fetch_column("E-mail").unwrap().collect();
        assert_eq!(emails, ["john.doe@example.com", "jane.doe@example.com"]);

        let firsts: Vec<_> = rs.fetch_column(ColumnRef::Index(0)).unwrap().collect();
        assert_eq!(firsts, ["john", "jane"]);

        assert!(rs.fetch_column(ColumnRef::Index(3)).is_err());
        assert!(rs.fetch_column("Phone").is_err());
    }

    #[test]
    fn test_fetch_pairs() {
        let source = people();
        let rs = Statement::new()
            .process_with_header(&source, labels())
            .unwrap();
        let pairs: Vec<_> = rs.fetch_pairs("First Name", "E-mail").unwrap().collect();
        assert_eq!(
            pairs,
            vec![
                ("john".to_string(), Some("john.doe@example.com".to_string())),
                ("jane".to_string(), Some("jane.doe@example.com".to_string())),
            ]
        );
    }

    #[test]
    fn test_json_serialize_with_pagination() {
        let source = people();
        let rs = Statement::new()
            .offset(1)
            .unwrap()
            .limit(1)
            .unwrap()
            .process_with_header(&source, labels())
            .unwrap();
        assert_eq!(
            rs.json_serialize(),
            json!([{
                "First Name": "jane",
                "Last Name": "doe",
                "E-mail": "jane.doe@example.com"
            }])
        );
        assert_eq!(serde_json::to_value(&rs).unwrap(), rs.json_serialize());
    }

    #[test]
    fn test_unsorted_pipeline_is_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = MemorySource::new((0..100).map(|i| vec![i.to_string()]));
        let rs = Statement::new()
            .filter(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            })
            .process(&source)
            .unwrap();

        let taken: Vec<_> = rs.records().take(3).collect();
        assert_eq!(taken.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_sorted_pipeline_materializes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = MemorySource::new((0..100).map(|i| vec![format!("{:03}", i)]));
        let rs = Statement::new()
            .filter(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            })
            .order_by(|a, b| b.get(0).cmp(&a.get(0)))
            .process(&source)
            .unwrap();

        let first = rs.records().next().unwrap();
        assert_eq!(first.get(0), Some("099"));
        assert_eq!(calls.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_count_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = people();
        let rs = Statement::new()
            .filter(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            })
            .process(&source)
            .unwrap();

        assert_eq!(rs.count(), 2);
        assert_eq!(rs.count(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
