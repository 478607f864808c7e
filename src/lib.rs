//! Existence lookups against the `users` table of a local SQLite database.
//!
//! # Intention
//!
//! - Answer "does this value exist in this column of `users`?" and report
//!   the match count alongside the first row of the table.
//! - Offer correctly scoped alternatives ([`UserStore::exists`],
//!   [`UserStore::matching_rows`]) next to that report.
//!
//! # Architectural Boundaries
//!
//! - Only reads from the `users` table; schema management is out of scope.
//! - Column names reach SQL text only after being checked against the live
//!   schema ([`schema::resolve_column`]); values are always bound.
//! - One connection per lookup, owned by [`UserStore`] and closed on every
//!   exit path.

pub mod config;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod output;
pub mod row;
pub mod schema;
pub mod store;
pub mod value;

pub use config::{Cli, LookupConfig, LookupMode};
pub use error::{LookupError, Result};
pub use lookup::{matching_rows_in, run, value_exist, value_exist_in, with_store, Report};
pub use output::OutputFormat;
pub use row::Row;
pub use schema::{ColumnName, USERS_TABLE};
pub use store::{CredentialCheck, UserStore};
pub use value::Value;
