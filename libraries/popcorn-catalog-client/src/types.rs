//! Types for OMDb requests and responses.

use popcorn_core::types::{parse_catalog_rating, parse_runtime_minutes};
use popcorn_core::{MovieDetail, MovieId, MovieSummary, SearchResults};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to the movie catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog (e.g., "https://www.omdbapi.com")
    pub base_url: String,
    /// Static API key sent with every request
    pub api_key: String,
}

impl CatalogConfig {
    /// Create a new catalog config.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// `"True"` / `"False"` flag present on every OMDb body
fn is_true(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

/// Response from `?s=<title>`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchHit>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn found(&self) -> bool {
        is_true(&self.response)
    }

    pub fn error_reason(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "Movie not found!".to_string())
    }

    pub fn into_results(self) -> SearchResults {
        let movies: Vec<MovieSummary> = self.search.into_iter().map(Into::into).collect();
        let total_results = self
            .total_results
            .as_deref()
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(movies.len());

        SearchResults {
            movies,
            total_results,
        }
    }
}

/// One entry of the `Search` array.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

impl From<SearchHit> for MovieSummary {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: MovieId::new(hit.imdb_id),
            title: hit.title,
            year: hit.year,
            poster_url: hit.poster,
        }
    }
}

/// Response from `?i=<id>`.
///
/// Only `Response` is guaranteed; a failed lookup carries `Error` instead
/// of the record fields.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
}

impl DetailResponse {
    pub fn found(&self) -> bool {
        is_true(&self.response)
    }

    pub fn error_reason(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "Movie not found!".to_string())
    }

    /// Convert to the domain record. `requested` fills in a missing `imdbID`.
    pub fn into_detail(self, requested: &MovieId) -> MovieDetail {
        let id = if self.imdb_id.is_empty() {
            requested.clone()
        } else {
            MovieId::new(self.imdb_id)
        };

        MovieDetail {
            id,
            runtime_minutes: parse_runtime_minutes(&self.runtime),
            catalog_rating: parse_catalog_rating(&self.imdb_rating),
            title: self.title,
            year: self.year,
            poster_url: self.poster,
            runtime: self.runtime,
            plot: self.plot,
            release_date: self.released,
            actors: self.actors,
            director: self.director,
            genre: self.genre,
        }
    }
}
