//! Search lifecycle
//!
//! Every query change cancels the request issued for the previous query.
//! The cancel and the state reset happen inside one `watch` update, and a
//! finished request applies its outcome in another update only if its
//! token is still live. A superseded request can therefore never write.

use std::sync::Arc;

use popcorn_core::{FetchResult, MovieCatalog, SearchResults};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::state::{LoadState, SearchState};

/// Drives searches for the current query.
pub struct SearchController {
    catalog: Arc<dyn MovieCatalog>,
    state: Arc<watch::Sender<SearchState>>,
    current: Option<CancellationToken>,
    query: String,
}

impl SearchController {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            catalog,
            state: Arc::new(state),
            current: None,
            query: String::new(),
        }
    }

    /// Read-only view of the state, updated as searches resolve
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query.
    ///
    /// An empty query resets to an empty result list without touching the
    /// network. Otherwise a search is spawned and its handle returned; the
    /// handle completes once the outcome has been applied (or discarded).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<JoinHandle<()>> {
        let query = query.into();
        self.query.clone_from(&query);

        let previous = self.current.take();

        if query.is_empty() {
            self.state.send_modify(|state| {
                if let Some(token) = &previous {
                    token.cancel();
                }
                *state = LoadState::Ready(SearchResults::empty());
            });
            debug!("Query cleared");
            return None;
        }

        let token = CancellationToken::new();
        self.state.send_modify(|state| {
            if let Some(token) = &previous {
                token.cancel();
            }
            *state = LoadState::Loading;
        });
        self.current = Some(token.clone());
        debug!(query = %query, "Search issued");

        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let outcome = catalog.search(&query, &token).await;
            apply(&state, &token, outcome);
        }))
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

fn apply(
    state: &watch::Sender<SearchState>,
    token: &CancellationToken,
    outcome: FetchResult<SearchResults>,
) {
    let applied = state.send_if_modified(|current| {
        if token.is_cancelled() {
            return false;
        }
        match &outcome {
            Ok(results) => {
                *current = LoadState::Ready(results.clone());
                true
            }
            Err(e) => match e.user_message() {
                Some(message) => {
                    *current = LoadState::Failed(message.to_string());
                    true
                }
                None => false,
            },
        }
    });

    if applied {
        match &outcome {
            Ok(results) => debug!(hits = results.len(), "Search resolved"),
            Err(e) => debug!(error = %e, "Search failed"),
        }
    } else {
        debug!("Stale search outcome discarded");
    }
}
