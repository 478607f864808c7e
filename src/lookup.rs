//! The existence lookup: count matches, then report the count together
//! with the first row of the users table.

use crate::config::{LookupConfig, LookupMode, DEFAULT_DB_PATH};
use crate::error::Result;
use crate::output::{self, OutputFormat};
use crate::row::Row;
use crate::store::UserStore;
use crate::value::Value;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Outcome of a lookup that found at least one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub count: u64,
    pub first_row: Row,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.first_row)
    }
}

/// Run `f` against a store opened at `path`, closing it on every path.
///
/// An error from `f` takes precedence over an error from closing.
pub fn with_store<T>(path: &Path, f: impl FnOnce(&UserStore) -> Result<T>) -> Result<T> {
    let store = UserStore::open(path)?;
    let outcome = f(&store);
    let closed = store.close();
    let value = outcome?;
    closed?;
    Ok(value)
}

/// Look `value` up in `column_name` of the default database (`UserDB.db`)
/// and print the report to stdout.
///
/// Nothing is printed when there is no match.
pub fn value_exist(column_name: &str, value: impl Into<Value>) -> Result<Option<Report>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    value_exist_in(
        Path::new(DEFAULT_DB_PATH),
        column_name,
        value,
        OutputFormat::Text,
        &mut out,
    )
}

/// [`value_exist`] against an explicit database and writer.
pub fn value_exist_in<W: Write>(
    path: &Path,
    column_name: &str,
    value: impl Into<Value>,
    format: OutputFormat,
    out: &mut W,
) -> Result<Option<Report>> {
    let value = value.into();
    let report = with_store(path, |store| store.lookup(column_name, value))?;
    match &report {
        Some(report) => output::write_report(out, format, report)?,
        None => debug!(column = column_name, "no matching rows"),
    }
    Ok(report)
}

/// Print the rows of `column_name` equal to `value`.
pub fn matching_rows_in<W: Write>(
    path: &Path,
    column_name: &str,
    value: impl Into<Value>,
    limit: Option<u32>,
    format: OutputFormat,
    out: &mut W,
) -> Result<Vec<Row>> {
    let value = value.into();
    let rows = with_store(path, |store| {
        let column = store.column(column_name)?;
        store.matching_rows(&column, &value, limit)
    })?;
    output::write_rows(out, format, &rows)?;
    Ok(rows)
}

/// Execute the lookup described by `config`, writing results to `out`.
pub fn run<W: Write>(config: &LookupConfig, out: &mut W) -> Result<()> {
    match config.mode {
        LookupMode::Report => {
            value_exist_in(
                &config.db_path,
                &config.column,
                config.value.as_str(),
                config.format,
                out,
            )?;
        }
        LookupMode::Matching { limit } => {
            matching_rows_in(
                &config.db_path,
                &config.column,
                config.value.as_str(),
                limit,
                config.format,
                out,
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
