//! Column allow-list for the users table.
//!
//! Column names cannot be bound as query parameters, so every name that
//! ends up in SQL text is first checked against the live table schema and
//! then quoted as an identifier.

use crate::error::{LookupError, Result};
use rusqlite::Connection;
use std::fmt;

/// The table every lookup runs against.
pub const USERS_TABLE: &str = "users";

/// A column name known to exist in the table it was resolved against.
///
/// Only [`resolve_column`] constructs one, so holding a `ColumnName` means
/// the name came from the schema rather than from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnName(String);

impl ColumnName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name as a double-quoted SQL identifier.
    pub fn quoted(&self) -> String {
        quote_identifier(&self.0)
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Column names of `table` in declaration order, generated columns included.
///
/// `table_xinfo` marks each column with `hidden`: 0 for ordinary columns,
/// 2 and 3 for virtual and stored generated columns, 1 for the hidden
/// columns of virtual tables, which `SELECT *` does not return.
///
/// A table always has at least one column, so an empty result means the
/// table does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let sql = format!("PRAGMA table_xinfo({})", quote_identifier(table));
    let mut stmt = conn.prepare(&sql)?;
    let columns = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>("name")?, row.get::<_, i64>("hidden")?))
        })?
        .filter_map(|column| match column {
            Ok((_, 1)) => None,
            Ok((name, _)) => Some(Ok(name)),
            Err(err) => Some(Err(err)),
        })
        .collect::<rusqlite::Result<Vec<_>>>()?;
    if columns.is_empty() {
        return Err(LookupError::MissingTable {
            table: table.to_string(),
        });
    }
    Ok(columns)
}

/// Check `name` against the columns of `table`.
///
/// Matching is ASCII case-insensitive, as SQLite's identifier matching is;
/// the declared spelling is kept.
pub fn resolve_column(conn: &Connection, table: &str, name: &str) -> Result<ColumnName> {
    let known = table_columns(conn, table)?;
    match known.iter().find(|column| column.eq_ignore_ascii_case(name)) {
        Some(column) => Ok(ColumnName(column.clone())),
        None => Err(LookupError::UnknownColumn {
            column: name.to_string(),
            table: table.to_string(),
            known,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            );
            "#,
        )
        .unwrap();
        conn
    }

    #[test]
    fn lists_columns_in_declaration_order() {
        let columns = table_columns(&conn(), USERS_TABLE).unwrap();
        assert_eq!(columns, vec!["id", "username", "email", "password"]);
    }

    #[test]
    fn missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        let err = table_columns(&conn, USERS_TABLE).unwrap_err();
        assert!(matches!(err, LookupError::MissingTable { ref table } if table == "users"));
    }

    #[test]
    fn resolves_known_column_case_insensitively() {
        let column = resolve_column(&conn(), USERS_TABLE, "EMAIL").unwrap();
        assert_eq!(column.as_str(), "email");
        assert_eq!(column.quoted(), "\"email\"");
    }

    #[test]
    fn rejects_unknown_and_injected_names() {
        let conn = conn();
        for name in ["phone", "email = email OR 1", "email; DROP TABLE users", ""] {
            let err = resolve_column(&conn, USERS_TABLE, name).unwrap_err();
            match err {
                LookupError::UnknownColumn { column, known, .. } => {
                    assert_eq!(column, name);
                    assert_eq!(known.len(), 4);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn generated_columns_are_known() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE users (
                email TEXT,
                lower_email TEXT GENERATED ALWAYS AS (lower(email)) VIRTUAL,
                domain TEXT GENERATED ALWAYS AS (substr(email, instr(email, '@') + 1)) STORED
            );
            "#,
        )
        .unwrap();
        let columns = table_columns(&conn, USERS_TABLE).unwrap();
        assert_eq!(columns, vec!["email", "lower_email", "domain"]);
        let column = resolve_column(&conn, USERS_TABLE, "lower_email").unwrap();
        assert_eq!(column.as_str(), "lower_email");
    }

    #[test]
    fn quotes_embedded_double_quotes() {
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
