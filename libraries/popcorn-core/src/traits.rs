//! Traits at the seams between the controllers and their collaborators

use crate::error::{FetchResult, Result};
use crate::types::{MovieDetail, MovieId, SearchResults};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Read-only access to the remote movie catalog.
///
/// Implementations must resolve to `FetchError::Cancelled` once `cancel`
/// fires, and should abort the underlying request when they do.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search by title. Callers never pass an empty title.
    async fn search(&self, title: &str, cancel: &CancellationToken) -> FetchResult<SearchResults>;

    /// Fetch the full detail record for one movie.
    async fn get_detail(&self, id: &MovieId, cancel: &CancellationToken)
        -> FetchResult<MovieDetail>;
}

/// Flat key/value persistence
///
/// Values are opaque strings; callers own the serialization format.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a slot, `None` if it was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a slot (no-op if absent)
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Where the window or page title is shown
pub trait TitleSink: Send + Sync {
    fn set_title(&self, title: &str);
}
