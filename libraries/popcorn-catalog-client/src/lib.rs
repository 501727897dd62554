//! Popcorn Catalog Client
//!
//! HTTP client for the OMDb movie catalog.
//!
//! # Features
//!
//! - **Search**: find movies by title
//! - **Detail**: fetch the full record for one catalog id
//! - **Cancellation**: every call takes a `CancellationToken`; cancelling
//!   drops the in-flight request and resolves to `CatalogError::Cancelled`
//!
//! # Example
//!
//! ```ignore
//! use popcorn_catalog_client::{CatalogConfig, OmdbClient};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CatalogConfig::new("https://www.omdbapi.com", "your-api-key");
//!     let client = OmdbClient::new(config)?;
//!
//!     let cancel = CancellationToken::new();
//!     let results = client.search_movies("matrix", &cancel).await?;
//!     println!("Found {} results", results.total_results);
//!
//!     let detail = client.movie_detail(&results.movies[0].id, &cancel).await?;
//!     println!("{} ({})", detail.title, detail.runtime);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

// Re-export main types
pub use client::OmdbClient;
pub use error::{CatalogError, Result};
pub use types::CatalogConfig;
