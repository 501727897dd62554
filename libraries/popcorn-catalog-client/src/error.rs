//! Error types for the catalog client.

use popcorn_core::FetchError;
use thiserror::Error;

/// Errors that can occur when talking to the movie catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog returned a non-success status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Catalog answered `"Response": "False"`; carries the catalog's reason
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse catalog response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid catalog URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Invalid request input (e.g. empty title)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request was cancelled before it resolved
    #[error("Request cancelled")]
    Cancelled,
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<CatalogError> for FetchError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(reason) => FetchError::NotFound(reason),
            CatalogError::Cancelled => FetchError::Cancelled,
            other => FetchError::Network(other.to_string()),
        }
    }
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_into_fetch_errors() {
        assert_eq!(
            FetchError::from(CatalogError::NotFound("Movie not found!".into())),
            FetchError::NotFound("Movie not found!".into())
        );
        assert_eq!(FetchError::from(CatalogError::Cancelled), FetchError::Cancelled);

        let server = FetchError::from(CatalogError::ServerError {
            status: 503,
            message: "unavailable".into(),
        });
        assert!(matches!(server, FetchError::Network(msg) if msg.contains("503")));

        let parse = FetchError::from(CatalogError::ParseError("bad json".into()));
        assert!(matches!(parse, FetchError::Network(_)));
    }
}
