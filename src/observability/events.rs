//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events in tabquery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A statement is being applied to a source
    QueryBegin,
    /// Caller-supplied header failed validation
    HeaderRejected,
    /// Filtered records were buffered for sorting
    QuerySortMaterialized,
    /// A result set finished its first full traversal
    QueryComplete,
    /// Offset, limit, position or column reference rejected
    ArgumentRejected,
    /// Statement configuration loaded
    ConfigLoaded,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::QueryBegin => "QUERY_BEGIN",
            Event::HeaderRejected => "HEADER_REJECTED",
            Event::QuerySortMaterialized => "QUERY_SORT_MATERIALIZED",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::ArgumentRejected => "ARGUMENT_REJECTED",
            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::HeaderRejected | Event::ArgumentRejected => Severity::Warn,
            Event::ConfigLoaded => Severity::Info,
            _ => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
