//! Error types for bintrail-core.

use bintrail_backend::BackendError;
use bintrail_db::DbError;
use miette::Diagnostic;
use thiserror::Error;

/// Core error type for bintrail operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Backend(#[from] BackendError),

    #[error("Unknown repository {project}/{name}")]
    #[diagnostic(
        code(bintrail::unknown_repository),
        help("Run a reconciliation for the repository first, or check the target spelling")
    )]
    UnknownRepository { project: String, name: String },

    #[error("Release record {0} not found")]
    #[diagnostic(code(bintrail::record_not_found))]
    RecordNotFound(i32),

    #[error("Invalid timestamp: {0}")]
    #[diagnostic(
        code(bintrail::timestamp),
        help("Timestamps must be RFC 3339, e.g. 2026-05-10T12:00:00Z")
    )]
    InvalidTimestamp(String),
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(err.into())
    }
}
