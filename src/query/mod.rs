//! Query subsystem for tabquery
//!
//! A `Statement` describes how to filter, order and paginate a record
//! stream; applying it to a `RecordSource` produces a `ResultSet`.
//!
//! # Processing Flow (strict order)
//!
//! 1. Resolve the effective header (validated when caller-supplied)
//! 2. Read records from the source, header row excluded
//! 3. Filter by every predicate, in declaration order (AND)
//! 4. Sort by the composite of all comparators (stable)
//! 5. Apply offset, then limit
//!
//! # Invariants
//!
//! - Statements are immutable; builders return new values
//! - Result sets are re-iterable and yield identical records every time
//! - A result set is itself a record source
//! - Row arity mismatches are never errors: they are handled by omission

mod errors;
mod filters;
mod header;
mod record;
mod result;
mod sorter;
mod source;
mod statement;

pub use errors::{QueryError, QueryErrorCode, QueryResult, Severity};
pub use filters::{Filter, FilterOp, PredicateFilter, RecordPredicate};
pub use header::{resolve_column, validate_header, ColumnRef, Header};
pub use record::Record;
pub use result::{RecordIter, ResultSet};
pub use sorter::{RecordComparator, ResultSorter, SortDirection, SortSpec};
pub use source::{MemorySource, RecordSource, RowIter};
pub use statement::Statement;
