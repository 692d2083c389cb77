//! CLI argument definitions using clap
//!
//! Commands:
//! - tabquery query --rows <path> [--config <path>] [selection flags]
//! - tabquery check --config <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tabquery - filter, order and paginate tabular records
#[derive(Parser, Debug)]
#[command(name = "tabquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum log severity written (trace, info, warn, error, fatal)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a statement to a JSON array of rows and print the result
    Query(QueryArgs),

    /// Validate a statement configuration file and exit
    Check {
        /// Path to statement configuration file
        #[arg(long)]
        config: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Path to a JSON file holding an array of rows (arrays of scalars)
    #[arg(long)]
    pub rows: PathBuf,

    /// Path to statement configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Row index to use as the header (excluded from the data)
    #[arg(long)]
    pub header_offset: Option<usize>,

    /// Records to skip; overrides the configuration
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<i64>,

    /// Maximum records, -1 for no cap; overrides the configuration
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<i64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// What to print; the full serialized result set when none is given
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct OutputArgs {
    /// Print one column (header label, else index)
    #[arg(long, allow_hyphen_values = true)]
    pub column: Option<String>,

    /// Print key/value pairs from two columns (header labels, else indexes)
    #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"], allow_hyphen_values = true)]
    pub pairs: Option<Vec<String>>,

    /// Print the record at this zero-based position
    #[arg(long, allow_hyphen_values = true)]
    pub one: Option<i64>,

    /// Print the number of records
    #[arg(long)]
    pub count: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
