//! Record sources
//!
//! A source yields one ordered sequence of field values per record and
//! exposes its own header (possibly empty). A row the source designates as
//! its header is never part of the data stream.

use super::errors::{QueryError, QueryResult};
use super::header::Header;

/// Boxed row iterator borrowed from a source
pub type RowIter<'a> = Box<dyn Iterator<Item = Vec<String>> + 'a>;

/// Trait for anything a `Statement` can be processed against.
///
/// `rows` must be restartable: each call starts a fresh traversal that
/// yields the same rows in the same order.
pub trait RecordSource {
    /// Header exposed by the source itself
    fn header(&self) -> Header;

    /// Data rows, excluding any header row
    fn rows(&self) -> RowIter<'_>;
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn header(&self) -> Header {
        (**self).header()
    }

    fn rows(&self) -> RowIter<'_> {
        (**self).rows()
    }
}

/// In-memory source with an optional header row
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<Vec<String>>,
    header_offset: Option<usize>,
    header: Header,
}

impl MemorySource {
    /// Creates a headerless source over `rows`
    pub fn new<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            header_offset: None,
            header: Header::empty(),
        }
    }

    /// Designates row `offset` as the header.
    ///
    /// The row is validated as a header and excluded from `rows`.
    pub fn with_header_offset(mut self, offset: usize) -> QueryResult<Self> {
        let row = self.rows.get(offset).ok_or_else(|| {
            QueryError::invalid_argument(format!(
                "header offset {} is beyond the {} available rows",
                offset,
                self.rows.len()
            ))
        })?;
        self.header = Header::new(row.iter().cloned())?;
        self.header_offset = Some(offset);
        Ok(self)
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len() - usize::from(self.header_offset.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSource for MemorySource {
    fn header(&self) -> Header {
        self.header.clone()
    }

    fn rows(&self) -> RowIter<'_> {
        let skip = self.header_offset;
        Box::new(
            self.rows
                .iter()
                .enumerate()
                .filter(move |(i, _)| Some(*i) != skip)
                .map(|(_, row)| row.clone()),
        )
    }
}
