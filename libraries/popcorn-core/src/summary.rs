//! Watched-list statistics
//!
//! Always derived from the current list; nothing here is stored.

use crate::types::WatchedMovie;

/// Count and averages over a watch list.
///
/// An empty list yields 0.0 for every average.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_catalog_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedSummary {
    /// Compute the summary for the given entries.
    pub fn from_movies(movies: &[WatchedMovie]) -> Self {
        Self {
            count: movies.len(),
            avg_catalog_rating: mean(movies.iter().map(|m| m.catalog_rating)),
            avg_user_rating: mean(movies.iter().map(|m| f64::from(m.user_rating))),
            avg_runtime: mean(movies.iter().map(|m| f64::from(m.runtime_minutes))),
        }
    }

    pub fn avg_catalog_rating_display(&self) -> String {
        format!("{:.2}", self.avg_catalog_rating)
    }

    pub fn avg_user_rating_display(&self) -> String {
        format!("{:.2}", self.avg_user_rating)
    }

    pub fn avg_runtime_display(&self) -> String {
        format!("{:.2}", self.avg_runtime)
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}
