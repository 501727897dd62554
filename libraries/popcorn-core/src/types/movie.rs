/// Movie records produced by the remote catalog
use serde::{Deserialize, Serialize};

use super::MovieId;

/// One search hit. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

/// Result list of a title search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Hits on the returned page, in catalog order
    pub movies: Vec<MovieSummary>,
    /// Total matches reported by the catalog (may exceed `movies.len()`)
    pub total_results: usize,
}

impl SearchResults {
    /// Empty result list (the "no search" state)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get the hit at a zero-based position
    pub fn get(&self, index: usize) -> Option<&MovieSummary> {
        self.movies.get(index)
    }
}

/// Full detail record for one movie.
///
/// Fetched fresh on every selection; text fields keep the catalog's
/// wording (including `"N/A"`), numeric fields are `None` when the catalog
/// value does not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    /// Runtime as reported (e.g. `"142 min"`)
    pub runtime: String,
    pub runtime_minutes: Option<u32>,
    /// Catalog rating on a 0-10 scale
    pub catalog_rating: Option<f64>,
    pub plot: String,
    pub release_date: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    /// Catalog rating for display (`"N/A"` when unknown)
    pub fn catalog_rating_display(&self) -> String {
        self.catalog_rating
            .map_or_else(|| "N/A".to_string(), |r| format!("{:.1}", r))
    }
}

/// Parse the leading integer of a runtime text such as `"142 min"`.
pub fn parse_runtime_minutes(text: &str) -> Option<u32> {
    text.split_whitespace().next()?.parse().ok()
}

/// Parse a decimal catalog rating such as `"9.3"`.
pub fn parse_catalog_rating(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
}
