/// Application error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Command(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] popcorn_catalog_client::CatalogError),

    #[error(transparent)]
    Popcorn(#[from] popcorn_core::PopcornError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<popcorn_storage::StorageError> for AppError {
    fn from(err: popcorn_storage::StorageError) -> Self {
        AppError::Popcorn(err.into())
    }
}
