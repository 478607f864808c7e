use thiserror::Error;

/// Errors raised by lookups against the users table.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to open database `{path}`: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("table `{table}` does not exist")]
    MissingTable { table: String },

    #[error("unknown column `{column}` in table `{table}` (known columns: {})", known.join(", "))]
    UnknownColumn {
        column: String,
        table: String,
        known: Vec<String>,
    },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("stored password hash is invalid: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to render json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_column_lists_known_columns() {
        let err = LookupError::UnknownColumn {
            column: "phone".into(),
            table: "users".into(),
            known: vec!["email".into(), "name".into()],
        };
        assert_eq!(
            err.to_string(),
            "unknown column `phone` in table `users` (known columns: email, name)"
        );
    }
}
