/// Watch-list entries
use serde::{Deserialize, Serialize};

use super::{MovieDetail, MovieId};

/// A movie the user has watched and rated.
///
/// The serialized field names match the layout the web front end wrote to
/// local storage, so an exported list can be imported unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedMovie {
    #[serde(rename = "imdbID")]
    pub id: MovieId,
    pub title: String,
    pub year: String,
    #[serde(rename = "poster")]
    pub poster_url: String,
    #[serde(rename = "runtime")]
    pub runtime_minutes: u32,
    #[serde(rename = "imdbRating")]
    pub catalog_rating: f64,
    #[serde(rename = "userRating")]
    pub user_rating: u8,
    /// How many times the pending rating changed before the movie was added
    #[serde(rename = "ratingDecisions", default)]
    pub rating_decisions: u32,
}

impl WatchedMovie {
    /// Build a watch-list entry from a loaded detail record.
    ///
    /// Unknown runtime and rating become 0.
    pub fn from_detail(detail: &MovieDetail, user_rating: u8, rating_decisions: u32) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            runtime_minutes: detail.runtime_minutes.unwrap_or(0),
            catalog_rating: detail.catalog_rating.unwrap_or(0.0),
            user_rating,
            rating_decisions,
        }
    }
}
