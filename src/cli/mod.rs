//! CLI module for tabquery
//!
//! Provides command-line interface for:
//! - query: apply a statement to a JSON rows file
//! - check: validate a statement configuration file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, OutputArgs, QueryArgs};
pub use commands::{parse_column, query, run, run_command, set_log_level};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_rows, rows_from_json, write_error, write_response};
