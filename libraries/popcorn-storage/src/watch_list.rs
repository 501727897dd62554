//! The watched-movies list
//!
//! An ordered list (insertion order = watch order) mirrored to one
//! key/value slot. The slot is read once when the list is loaded and
//! rewritten in full after every mutation.

use std::fmt;
use std::sync::Arc;

use popcorn_core::{KeyValueStore, MovieId, PopcornError, Result, WatchedMovie, WatchedSummary};
use tracing::{debug, info, warn};

/// Slot holding the serialized watch list
pub const WATCHED_KEY: &str = "watched";

/// Watched movies, persisted on every change.
///
/// Ids are unique: adding an id that is already present is rejected with
/// `PopcornError::Duplicate`.
pub struct WatchList {
    store: Arc<dyn KeyValueStore>,
    movies: Vec<WatchedMovie>,
}

impl WatchList {
    /// Restore the list from `store`.
    ///
    /// A missing, unreadable or corrupt slot yields an empty list; the
    /// problem is logged, never returned.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let movies = match store.get(WATCHED_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<WatchedMovie>>(&raw) {
                Ok(movies) => dedupe(movies),
                Err(e) => {
                    warn!(error = %e, "Persisted watch list is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No persisted watch list, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted watch list, starting empty");
                Vec::new()
            }
        };

        info!(count = movies.len(), "Watch list loaded");
        Self { store, movies }
    }

    /// Entries in watch order
    pub fn movies(&self) -> &[WatchedMovie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &MovieId) -> Option<&WatchedMovie> {
        self.movies.iter().find(|m| &m.id == id)
    }

    /// The rating the user gave `id`, if it is on the list
    pub fn user_rating(&self, id: &MovieId) -> Option<u8> {
        self.get(id).map(|m| m.user_rating)
    }

    /// Count and averages, recomputed on every call
    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_movies(&self.movies)
    }

    /// Append a movie and persist the list.
    ///
    /// If persisting fails the append is undone.
    pub async fn add(&mut self, movie: WatchedMovie) -> Result<()> {
        if self.contains(&movie.id) {
            return Err(PopcornError::Duplicate(movie.id));
        }

        let id = movie.id.clone();
        self.movies.push(movie);

        if let Err(e) = self.persist().await {
            self.movies.pop();
            return Err(e);
        }

        info!(id = %id, count = self.movies.len(), "Added to watch list");
        Ok(())
    }

    /// Remove the entry for `id` and persist the list.
    ///
    /// Returns `false` (and writes nothing) if `id` was not on the list.
    pub async fn remove(&mut self, id: &MovieId) -> Result<bool> {
        let Some(index) = self.movies.iter().position(|m| &m.id == id) else {
            return Ok(false);
        };

        let removed = self.movies.remove(index);

        if let Err(e) = self.persist().await {
            self.movies.insert(index, removed);
            return Err(e);
        }

        info!(id = %id, count = self.movies.len(), "Removed from watch list");
        Ok(true)
    }

    async fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.movies)?;
        self.store.set(WATCHED_KEY, &raw).await
    }
}

impl fmt::Debug for WatchList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchList")
            .field("movies", &self.movies)
            .finish_non_exhaustive()
    }
}

/// Keep the first entry per id; persisted data from older front ends
/// could contain repeats.
fn dedupe(movies: Vec<WatchedMovie>) -> Vec<WatchedMovie> {
    let before = movies.len();
    let mut seen = std::collections::HashSet::new();
    let unique: Vec<WatchedMovie> = movies
        .into_iter()
        .filter(|m| seen.insert(m.id.clone()))
        .collect();

    if unique.len() != before {
        warn!(
            dropped = before - unique.len(),
            "Persisted watch list had repeated ids"
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryKeyValueStore;

    fn watched(id: &str) -> WatchedMovie {
        WatchedMovie {
            id: MovieId::new(id),
            title: format!("Movie {}", id),
            year: "2001".into(),
            poster_url: "N/A".into(),
            runtime_minutes: 100,
            catalog_rating: 7.5,
            user_rating: 8,
            rating_decisions: 1,
        }
    }

    #[tokio::test]
    async fn missing_slot_loads_empty() {
        let list = WatchList::load(Arc::new(MemoryKeyValueStore::new())).await;
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn corrupt_slot_loads_empty() {
        let store = Arc::new(MemoryKeyValueStore::with_slot(WATCHED_KEY, "{oops"));
        let list = WatchList::load(store).await;
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn wrong_shape_loads_empty() {
        let store = Arc::new(MemoryKeyValueStore::with_slot(
            WATCHED_KEY,
            r#"{"imdbID": "tt1"}"#,
        ));
        let list = WatchList::load(store).await;
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn repeated_ids_in_slot_are_collapsed() {
        let raw = serde_json::to_string(&vec![watched("tt1"), watched("tt2"), watched("tt1")])
            .unwrap();
        let store = Arc::new(MemoryKeyValueStore::with_slot(WATCHED_KEY, raw));

        let list = WatchList::load(store).await;
        let ids: Vec<&str> = list.movies().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["tt1", "tt2"]);
    }

    #[tokio::test]
    async fn add_rejects_duplicate() {
        let mut list = WatchList::load(Arc::new(MemoryKeyValueStore::new())).await;
        list.add(watched("tt1")).await.unwrap();

        let err = list.add(watched("tt1")).await.unwrap_err();
        assert!(matches!(err, PopcornError::Duplicate(id) if id.as_str() == "tt1"));
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn remove_absent_is_noop() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut list = WatchList::load(store.clone()).await;

        assert!(!list.remove(&MovieId::new("tt404")).await.unwrap());
        assert_eq!(store.get(WATCHED_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn user_rating_lookup() {
        let mut list = WatchList::load(Arc::new(MemoryKeyValueStore::new())).await;
        list.add(watched("tt1")).await.unwrap();

        assert_eq!(list.user_rating(&MovieId::new("tt1")), Some(8));
        assert_eq!(list.user_rating(&MovieId::new("tt2")), None);
    }
}
