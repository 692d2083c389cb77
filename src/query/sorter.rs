//! Result sorting for statements
//!
//! Comparators are applied in declaration order: a later comparator is only
//! consulted when every earlier one reports `Equal`. The sort is stable, so
//! records that compare equal under all comparators keep their input order.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::header::ColumnRef;
use super::record::Record;

/// Caller-supplied record comparator
pub type RecordComparator = Arc<dyn Fn(&Record, &Record) -> Ordering + Send + Sync>;

/// Sorts result records
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records by the composite of `comparators`.
    ///
    /// Sort is stable and deterministic. An empty comparator list leaves
    /// the records untouched.
    pub fn sort(records: &mut [Record], comparators: &[RecordComparator]) {
        if comparators.is_empty() {
            return;
        }
        records.sort_by(|a, b| Self::compare(a, b, comparators));
    }

    /// Compares two records with the first comparator that tells them apart
    pub fn compare(a: &Record, b: &Record, comparators: &[RecordComparator]) -> Ordering {
        comparators
            .iter()
            .map(|cmp| cmp(a, b))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Single-column sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column to sort by
    pub column: ColumnRef,
    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,
    /// Compare values as numbers instead of text
    #[serde(default)]
    pub numeric: bool,
}

impl SortSpec {
    pub fn asc(column: impl Into<ColumnRef>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
            numeric: false,
        }
    }

    pub fn desc(column: impl Into<ColumnRef>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
            numeric: false,
        }
    }

    pub fn asc_num(column: impl Into<ColumnRef>) -> Self {
        Self {
            numeric: true,
            ..Self::asc(column)
        }
    }

    pub fn desc_num(column: impl Into<ColumnRef>) -> Self {
        Self {
            numeric: true,
            ..Self::desc(column)
        }
    }

    /// Compares two records on this column
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let a_val = a.get_ref(&self.column);
        let b_val = b.get_ref(&self.column);

        let ordering = if self.numeric {
            Self::compare_numbers(a_val, b_val)
        } else {
            a_val.cmp(&b_val)
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Ordering rules: missing < unparseable < number; unparseable values
    /// compare as text among themselves
    fn compare_numbers(a: Option<&str>, b: Option<&str>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_s), Some(b_s)) => {
                match (a_s.trim().parse::<f64>(), b_s.trim().parse::<f64>()) {
                    (Ok(a_f), Ok(b_f)) => a_f.total_cmp(&b_f),
                    (Err(_), Ok(_)) => Ordering::Less,
                    (Ok(_), Err(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => a_s.cmp(b_s),
                }
            }
        }
    }

    /// Converts the specification into a record comparator
    pub fn into_comparator(self) -> RecordComparator {
        Arc::new(move |a: &Record, b: &Record| self.compare(a, b))
    }
}
