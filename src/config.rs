use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "UserDB.db";
pub const DEFAULT_COLUMN: &str = "email";
pub const DEFAULT_VALUE: &str = "a@aol.com";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// What a lookup prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupMode {
    /// Match count plus the first row of the table
    #[default]
    Report,
    /// The matching rows themselves
    Matching { limit: Option<u32> },
}

/// Lookup configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Column of the users table to match against
    pub column: String,
    /// Value to look for
    pub value: String,
    pub mode: LookupMode,
    pub format: OutputFormat,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            column: DEFAULT_COLUMN.to_string(),
            value: DEFAULT_VALUE.to_string(),
            mode: LookupMode::default(),
            format: OutputFormat::default(),
        }
    }
}

impl LookupConfig {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            ..Self::default()
        }
    }
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }
    pub fn with_mode(mut self, mode: LookupMode) -> Self {
        self.mode = mode;
        self
    }
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Check whether a value exists in a column of the users table.
#[derive(Debug, Parser)]
#[command(name = "user-lookup", version, about, long_about = None)]
pub struct Cli {
    /// Column of the users table to match against
    pub column: String,

    /// Value to look for
    pub value: String,

    /// SQLite database file
    #[arg(long = "db", env = "USER_LOOKUP_DB", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Print the matching rows instead of the count and first row
    #[arg(long)]
    pub matching: bool,

    /// Maximum number of rows printed with --matching
    #[arg(long, requires = "matching")]
    pub limit: Option<u32>,

    /// Output format
    #[arg(long, value_enum, env = "USER_LOOKUP_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    pub fn into_config(self) -> LookupConfig {
        let mode = if self.matching {
            LookupMode::Matching { limit: self.limit }
        } else {
            LookupMode::Report
        };
        LookupConfig::new(self.column, self.value)
            .with_db_path(self.db_path)
            .with_mode(mode)
            .with_format(self.format)
    }
}
