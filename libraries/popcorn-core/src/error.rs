/// Core error types for Popcorn
use thiserror::Error;

use crate::types::MovieId;

/// Result type alias using `PopcornError`
pub type Result<T> = std::result::Result<T, PopcornError>;

/// Result type for catalog fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Message shown when the catalog reports zero matches
pub const NOT_FOUND_MESSAGE: &str = "Movie not found!";

/// Message shown for transport failures and non-success responses
pub const NETWORK_ERROR_MESSAGE: &str = "An error occurred while fetching the data";

/// Core error type for Popcorn
#[derive(Error, Debug)]
pub enum PopcornError {
    /// Movie is already on the watch list
    #[error("Movie already on the watch list: {0}")]
    Duplicate(MovieId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl PopcornError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Outcome classes of a catalog fetch, as seen by the lifecycle controllers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The catalog explicitly reported zero results
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure, non-2xx status or unreadable body
    #[error("Network error: {0}")]
    Network(String),

    /// The request was superseded; never shown to the user
    #[error("Request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Whether this outcome must be discarded silently.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The fixed user-facing message, or `None` for cancellations.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::NotFound(_) => Some(NOT_FOUND_MESSAGE),
            Self::Network(_) => Some(NETWORK_ERROR_MESSAGE),
            Self::Cancelled => None,
        }
    }
}
