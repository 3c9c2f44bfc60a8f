//! Error types for bintrail-db.

use miette::Diagnostic;
use thiserror::Error;

/// Database error type for bintrail-db operations.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Database connection failed: {0}")]
    #[diagnostic(
        code(bintrail_db::connection),
        help("Check if the database file exists and is accessible")
    )]
    ConnectionError(String),

    #[error("Database query failed: {0}")]
    #[diagnostic(code(bintrail_db::query))]
    QueryError(String),

    #[error("Database migration failed: {0}")]
    #[diagnostic(
        code(bintrail_db::migration),
        help("The database schema may be corrupted. Try removing the database file.")
    )]
    MigrationError(String),

    #[error("Record not found: {0}")]
    #[diagnostic(code(bintrail_db::not_found))]
    NotFound(String),
}

impl From<diesel::result::Error> for DbError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => DbError::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(_, info) => {
                DbError::QueryError(info.message().to_string())
            }
            other => DbError::QueryError(other.to_string()),
        }
    }
}

impl From<diesel::result::ConnectionError> for DbError {
    fn from(err: diesel::result::ConnectionError) -> Self {
        DbError::ConnectionError(err.to_string())
    }
}

/// Result type alias for bintrail-db operations.
pub type Result<T> = std::result::Result<T, DbError>;
