//! CLI command implementations
//!
//! Commands are thin: they load inputs, build a statement, and print what
//! the result set returns. All query semantics live in `crate::query`.

use serde_json::{json, Value};

use crate::config::StatementConfig;
use crate::observability::{Logger, Severity};
use crate::query::{ColumnRef, Header, MemorySource, ResultSet};

use super::args::{Cli, Command, OutputArgs, QueryArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_rows, write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match set_log_level(&cli.log_level).and_then(|()| run_command(cli.command)) {
        Ok(()) => Ok(()),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Applies the `--log-level` argument to the logger
pub fn set_log_level(level: &str) -> CliResult<()> {
    let severity = Severity::parse(level)
        .ok_or_else(|| CliError::config_error(format!("Unknown log level: {}", level)))?;
    Logger::set_min_severity(severity);
    Ok(())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Query(args) => write_response(query(&args)?),
        Command::Check { config } => {
            StatementConfig::load(&config)?;
            write_response(json!({ "config": config.display().to_string() }))
        }
    }
}

/// Apply a statement to the rows file and render the selected output
pub fn query(args: &QueryArgs) -> CliResult<Value> {
    let mut config = match &args.config {
        Some(path) => StatementConfig::load(path)?,
        None => StatementConfig::default(),
    };
    if let Some(offset) = args.offset {
        config.offset = offset;
    }
    if let Some(limit) = args.limit {
        config.limit = limit;
    }

    let mut source = MemorySource::new(read_rows(&args.rows)?);
    if let Some(offset) = args.header_offset {
        source = source.with_header_offset(offset)?;
    }

    let result = config.process(&source)?;
    render(&result, &args.output)
}

fn render(result: &ResultSet<'_>, output: &OutputArgs) -> CliResult<Value> {
    if let Some(column) = &output.column {
        let values: Vec<String> = result.fetch_column(parse_column(column, result.header()))?.collect();
        return Ok(json!(values));
    }
    if let Some(pairs) = &output.pairs {
        let [key, value] = pairs.as_slice() else {
            return Err(CliError::input_error("--pairs takes exactly two columns"));
        };
        let pairs: Vec<Value> = result
            .fetch_pairs(
                parse_column(key, result.header()),
                parse_column(value, result.header()),
            )?
            .map(|(k, v)| json!([k, v]))
            .collect();
        return Ok(Value::Array(pairs));
    }
    if let Some(n) = output.one {
        return Ok(result.fetch_one(n)?.to_json());
    }
    if output.count {
        return Ok(json!(result.count()));
    }
    Ok(result.json_serialize())
}

/// A column argument names a header label when one matches exactly, and is
/// otherwise an index if it parses as an integer, a label if not
pub fn parse_column(arg: &str, header: &Header) -> ColumnRef {
    if header.position(arg).is_some() {
        return ColumnRef::name(arg);
    }
    match arg.parse::<i64>() {
        Ok(i) => ColumnRef::Index(i),
        Err(_) => ColumnRef::name(arg),
    }
}
