//! # Store Errors
//!
//! Error types for the relational store. Constraint failures reported by
//! SQLite are classified so callers can turn them into conflicts instead of
//! internal errors.

use rusqlite::ffi;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Relational store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A UNIQUE or PRIMARY KEY constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A CHECK constraint rejected the write
    #[error("Check constraint violated: {0}")]
    CheckViolation(String),

    /// A FOREIGN KEY constraint rejected the write
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// Expected row does not exist
    #[error("Record not found")]
    NotFound,

    /// Any other SQLite failure
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),
}

impl StoreError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::UniqueViolation(_) => 409,
            StoreError::CheckViolation(_) => 400,
            StoreError::ForeignKeyViolation(_) => 400,
            StoreError::NotFound => 404,
            StoreError::Database(_) => 500,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            rusqlite::Error::SqliteFailure(ref failure, ref message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let detail = message.clone().unwrap_or_else(|| failure.to_string());
                let extended_code = failure.extended_code;
                match extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        StoreError::UniqueViolation(detail)
                    }
                    ffi::SQLITE_CONSTRAINT_CHECK => StoreError::CheckViolation(detail),
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => StoreError::ForeignKeyViolation(detail),
                    _ => StoreError::Database(err),
                }
            }
            other => StoreError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_maps_to_not_found() {
        let err = StoreError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, StoreError::NotFound));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_unique_violation_classified() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();

        let err: StoreError = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .unwrap_err()
            .into();

        assert!(err.is_unique_violation());
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_check_violation_classified() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER CHECK (v > 0));")
            .unwrap();

        let err: StoreError = conn
            .execute("INSERT INTO t VALUES (0)", [])
            .unwrap_err()
            .into();

        assert!(matches!(err, StoreError::CheckViolation(_)));
    }
}
