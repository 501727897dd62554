//! Fetch lifecycle state shared by both controllers

use popcorn_core::{MovieDetail, SearchResults};

/// Where one fetched resource currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested (empty query or no selection)
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The latest request succeeded
    Ready(T),
    /// The latest request failed; holds the user-facing message
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether a request has resolved (either way)
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// State of the search lifecycle
pub type SearchState = LoadState<SearchResults>;

/// State of the detail lifecycle
pub type DetailState = LoadState<MovieDetail>;

impl SearchState {
    /// Hits to display; empty unless the latest search succeeded
    pub fn results(&self) -> &[popcorn_core::MovieSummary] {
        self.ready().map_or(&[], |r| r.movies.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let ready: LoadState<u32> = LoadState::Ready(3);
        assert_eq!(ready.ready(), Some(&3));
        assert!(ready.is_settled());
        assert!(!ready.is_loading());

        let failed: LoadState<u32> = LoadState::Failed("Movie not found!".into());
        assert_eq!(failed.error(), Some("Movie not found!"));
        assert!(failed.is_settled());

        assert!(LoadState::<u32>::default().is_idle());
        assert!(!LoadState::<u32>::Loading.is_settled());
    }

    #[test]
    fn idle_search_has_no_results() {
        assert!(SearchState::Idle.results().is_empty());
        assert!(SearchState::Loading.results().is_empty());
    }
}
