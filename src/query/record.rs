//! Header-combined records
//!
//! A record keeps its values as a plain ordered sequence for positional
//! access and pairs them with header labels positionally for named access:
//! - shorter than the header: missing labels are absent, not padded
//! - longer than the header: extra values have no name but keep their position

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};

use super::header::{ColumnRef, Header};

/// A single row in a result set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    header: Header,
    values: Vec<String>,
}

impl Record {
    /// Creates a record under the given header
    pub fn new(header: Header, values: Vec<String>) -> Self {
        Self { header, values }
    }

    /// A record with no values
    pub fn empty(header: Header) -> Self {
        Self {
            header,
            values: Vec::new(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Field values in positional order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at position `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Value under header label `label`
    pub fn get_by_name(&self, label: &str) -> Option<&str> {
        self.header.position(label).and_then(|i| self.get(i))
    }

    /// Value selected by a column reference.
    ///
    /// Unlike `resolve_column`, a reference that cannot be resolved is
    /// simply absent here.
    pub fn get_ref(&self, column: &ColumnRef) -> Option<&str> {
        match column {
            ColumnRef::Index(i) => usize::try_from(*i).ok().and_then(|i| self.get(i)),
            ColumnRef::Name(label) => self.get_by_name(label),
        }
    }

    /// Label/value pairs for positions present in both header and record
    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.header
            .labels()
            .iter()
            .zip(self.values.iter())
            .map(|(label, value)| (label.as_str(), value.as_str()))
    }

    /// Structured form: an object keyed by label when a header is present,
    /// otherwise an array of values
    pub fn to_json(&self) -> Value {
        if self.header.is_empty() {
            Value::Array(self.values.iter().cloned().map(Value::String).collect())
        } else {
            let map: Map<String, Value> = self
                .named()
                .map(|(label, value)| (label.to_string(), Value::String(value.to_string())))
                .collect();
            Value::Object(map)
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.header.is_empty() {
            let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
            for value in &self.values {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let len = self.header.len().min(self.values.len());
            let mut map = serializer.serialize_map(Some(len))?;
            for (label, value) in self.named() {
                map.serialize_entry(label, value)?;
            }
            map.end()
        }
    }
}
