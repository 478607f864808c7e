use crate::error::{LookupError, Result};
use crate::lookup::Report;
use crate::row::Row;
use crate::schema::{self, ColumnName, USERS_TABLE};
use crate::value::Value;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Statement};
use std::path::Path;
use tracing::{debug, info};

pub const EMAIL_COLUMN: &str = "email";
pub const PASSWORD_COLUMN: &str = "password";

/// Outcome of [`UserStore::verify_credentials`].
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialCheck {
    /// The password matched; carries the user's row.
    Verified(Row),
    UnknownUser,
    WrongPassword,
}

/// Handle on the users table of one SQLite database.
///
/// The store owns its connection: it is closed by [`UserStore::close`] or,
/// on any early return, when the store is dropped.
#[derive(Debug)]
pub struct UserStore {
    conn: Connection,
    location: String,
}

impl UserStore {
    /// Open an existing database file read-write. Missing files are not
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let location = path.to_string_lossy().to_string();
        info!(path = %location, "opening user database");

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| LookupError::Open {
            path: location.clone(),
            source,
        })?;
        Ok(Self { conn, location })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| LookupError::Open {
            path: ":memory:".to_string(),
            source,
        })?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        let location = conn
            .path()
            .filter(|path| !path.is_empty())
            .unwrap_or(":memory:")
            .to_string();
        Self { conn, location }
    }

    /// Where the database lives, as given when it was opened.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Column names of the users table in declaration order.
    pub fn columns(&self) -> Result<Vec<String>> {
        schema::table_columns(&self.conn, USERS_TABLE)
    }

    /// Validate `name` against the users table.
    pub fn column(&self, name: &str) -> Result<ColumnName> {
        schema::resolve_column(&self.conn, USERS_TABLE, name)
    }

    /// Number of rows whose `column` equals `value`.
    pub fn count_matching(&self, column: &ColumnName, value: &Value) -> Result<u64> {
        let sql = format!(
            "SELECT count(*) FROM {USERS_TABLE} WHERE {} = ?1",
            column.quoted()
        );
        debug!(%sql, "counting matching rows");
        let count: i64 = self.conn.query_row(&sql, params![value], |row| row.get(0))?;
        row_count(count)
    }

    pub fn exists(&self, column: &ColumnName, value: &Value) -> Result<bool> {
        Ok(self.count_matching(column, value)? > 0)
    }

    /// First row of an unfiltered scan of the users table.
    pub fn first_row(&self) -> Result<Option<Row>> {
        let sql = format!("SELECT * FROM {USERS_TABLE}");
        debug!(%sql, "fetching first row");
        let mut stmt = self.conn.prepare(&sql)?;
        let columns = column_names(&stmt);
        let row = stmt
            .query_row([], |row| Row::from_sqlite(row, &columns))
            .optional()?;
        Ok(row)
    }

    /// Rows whose `column` equals `value`, in scan order.
    pub fn matching_rows(
        &self,
        column: &ColumnName,
        value: &Value,
        limit: Option<u32>,
    ) -> Result<Vec<Row>> {
        let mut sql = format!(
            "SELECT * FROM {USERS_TABLE} WHERE {} = ?1",
            column.quoted()
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        debug!(%sql, "fetching matching rows");
        let mut stmt = self.conn.prepare(&sql)?;
        let columns = column_names(&stmt);
        let rows = stmt
            .query_map(params![value], |row| Row::from_sqlite(row, &columns))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Count the rows where `column_name` equals `value` and, when there is
    /// at least one, pair the count with the first row of the whole table.
    ///
    /// The second query is deliberately unfiltered: the reported row is the
    /// first row of the table, not necessarily a matching one. Use
    /// [`UserStore::matching_rows`] for the rows that match.
    pub fn lookup(&self, column_name: &str, value: impl Into<Value>) -> Result<Option<Report>> {
        let column = self.column(column_name)?;
        let value = value.into();
        let count = self.count_matching(&column, &value)?;
        debug!(column = %column, count, "lookup counted");
        if count == 0 {
            return Ok(None);
        }
        Ok(self
            .first_row()?
            .map(|first_row| Report { count, first_row }))
    }

    /// Check `password` against the bcrypt hash stored for the user whose
    /// `email` matches.
    ///
    /// Read-only: the first row matching the email is fetched and its
    /// `password` cell verified. A missing user and a wrong password are
    /// outcomes, not errors; a malformed stored hash is an error.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Result<CredentialCheck> {
        let email_column = self.column(EMAIL_COLUMN)?;
        self.column(PASSWORD_COLUMN)?;
        let user = self
            .matching_rows(&email_column, &Value::from(email), Some(1))?
            .into_iter()
            .next();
        let Some(user) = user else {
            debug!("no user with that email");
            return Ok(CredentialCheck::UnknownUser);
        };
        let Some(hash) = user.get(PASSWORD_COLUMN).and_then(Value::as_text) else {
            debug!("stored password is not text");
            return Ok(CredentialCheck::WrongPassword);
        };
        if bcrypt::verify(password, hash)? {
            Ok(CredentialCheck::Verified(user))
        } else {
            Ok(CredentialCheck::WrongPassword)
        }
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        info!(path = %self.location, "closing user database");
        self.conn.close().map_err(|(_, err)| LookupError::Sqlite(err))
    }
}

// count(*) is never negative; a negative value is a driver anomaly.
fn row_count(count: i64) -> Result<u64> {
    u64::try_from(count)
        .map_err(|_| LookupError::Sqlite(rusqlite::Error::IntegralValueOutOfRange(0, count)))
}

fn column_names(stmt: &Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(String::from).collect()
}
