//! Error types for the backend client.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur when talking to the backend stores.
#[derive(Error, Diagnostic, Debug)]
pub enum BackendError {
    #[error("Not found on backend: {0}")]
    #[diagnostic(code(bintrail_backend::not_found))]
    NotFound(String),

    #[error("Failed to fetch from backend: {0}")]
    #[diagnostic(
        code(bintrail_backend::fetch),
        help("Verify the backend URL is correct and the service is reachable")
    )]
    FailedToFetchRemote(String),

    #[error("Invalid URL: {0}")]
    #[diagnostic(
        code(bintrail_backend::invalid_url),
        help("Ensure the backend URL is valid and properly formatted")
    )]
    InvalidUrl(String),

    #[error(transparent)]
    #[diagnostic(
        code(bintrail_backend::http),
        help("Check your network connection and the backend URL")
    )]
    UreqError(#[from] ureq::Error),
}

/// A specialized Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BackendError::NotFound("notification payload abc".to_string());
        assert_eq!(err.to_string(), "Not found on backend: notification payload abc");

        let err = BackendError::InvalidUrl("bad-url".to_string());
        assert_eq!(err.to_string(), "Invalid URL: bad-url");
    }
}
