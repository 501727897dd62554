//! OMDb catalog client.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogConfig, DetailResponse, SearchResponse};
use async_trait::async_trait;
use popcorn_core::{FetchResult, MovieCatalog, MovieDetail, MovieId, SearchResults};
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Client for the OMDb movie catalog.
///
/// Read-only: one search endpoint and one detail endpoint, both keyed by
/// the static API key from `CatalogConfig`.
///
/// # Example
///
/// ```ignore
/// use popcorn_catalog_client::{CatalogConfig, OmdbClient};
/// use tokio_util::sync::CancellationToken;
///
/// let client = OmdbClient::new(CatalogConfig::new("https://www.omdbapi.com", "key"))?;
/// let cancel = CancellationToken::new();
///
/// let results = client.search_movies("alien", &cancel).await?;
/// println!("Found {} results", results.total_results);
/// ```
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: Client,
    config: CatalogConfig,
}

impl OmdbClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        // Validate URL
        if config.base_url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        let normalized_config = CatalogConfig {
            base_url,
            api_key: config.api_key,
        };

        // No overall timeout: a hung request stays pending until cancelled
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Popcorn/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self {
            http,
            config: normalized_config,
        })
    }

    /// Get the catalog base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Search movies by title.
    ///
    /// Resolves to `NotFound` when the catalog reports no matches.
    pub async fn search_movies(
        &self,
        title: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchResults> {
        if title.is_empty() {
            return Err(CatalogError::InvalidInput("search title is empty".into()));
        }

        debug!(url = %self.config.base_url, title = %title, "Searching catalog");

        let request = self
            .http
            .get(format!("{}/", self.config.base_url))
            .query(&[("apikey", self.config.api_key.as_str()), ("s", title)]);

        let body: SearchResponse = run_cancellable(cancel, async {
            let response = check_status(request.send().await?).await?;
            response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse search response: {}", e))
            })
        })
        .await?;

        if !body.found() {
            let reason = body.error_reason();
            debug!(title = %title, reason = %reason, "Catalog reported no matches");
            return Err(CatalogError::NotFound(reason));
        }

        let results = body.into_results();
        info!(
            title = %title,
            results = results.len(),
            total = results.total_results,
            "Search complete"
        );
        Ok(results)
    }

    /// Fetch the full detail record for one movie.
    pub async fn movie_detail(
        &self,
        id: &MovieId,
        cancel: &CancellationToken,
    ) -> Result<MovieDetail> {
        debug!(url = %self.config.base_url, id = %id, "Fetching movie detail");

        let request = self
            .http
            .get(format!("{}/", self.config.base_url))
            .query(&[
                ("apikey", self.config.api_key.as_str()),
                ("i", id.as_str()),
            ]);

        let body: DetailResponse = run_cancellable(cancel, async {
            let response = check_status(request.send().await?).await?;
            response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse detail response: {}", e))
            })
        })
        .await?;

        if !body.found() {
            return Err(CatalogError::NotFound(body.error_reason()));
        }

        let detail = body.into_detail(id);
        debug!(id = %detail.id, title = %detail.title, "Fetched movie detail");
        Ok(detail)
    }
}

#[async_trait]
impl MovieCatalog for OmdbClient {
    async fn search(&self, title: &str, cancel: &CancellationToken) -> FetchResult<SearchResults> {
        self.search_movies(title, cancel).await.map_err(Into::into)
    }

    async fn get_detail(
        &self,
        id: &MovieId,
        cancel: &CancellationToken,
    ) -> FetchResult<MovieDetail> {
        self.movie_detail(id, cancel).await.map_err(Into::into)
    }
}

/// Race `request` against `cancel`. Losing the race drops the request,
/// which aborts the underlying connection.
async fn run_cancellable<T>(
    cancel: &CancellationToken,
    request: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(CatalogError::Cancelled),
        result = request => result,
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(CatalogError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}
