//! tabquery - a lazy, composable query layer over tabular record streams
//!
//! Build a [`query::Statement`], apply it to any [`query::RecordSource`],
//! and pull rows, columns or key/value pairs from the resulting
//! [`query::ResultSet`]. A result set is itself a record source, so
//! statements compose.

pub mod cli;
pub mod config;
pub mod observability;
pub mod query;
