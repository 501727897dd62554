//! Detail lifecycle
//!
//! Follows the selected movie id. Uses the same token discipline as
//! search, and owns the window title while a detail is loaded.

use std::sync::{Arc, Mutex, PoisonError};

use popcorn_core::{
    FetchError, FetchResult, MovieCatalog, MovieDetail, MovieId, PopcornError, Result,
    TitleGuard, TitleSink, WatchedMovie, DEFAULT_TITLE,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::state::{DetailState, LoadState};

/// Message shown when a detail fetch fails for any reason
pub const DETAIL_ERROR_MESSAGE: &str = "Could not load movie details";

/// Highest rating the star widget offers
pub const MAX_USER_RATING: u8 = 10;

/// State shared with in-flight fetch tasks.
struct Shared {
    state: watch::Sender<DetailState>,
    title: Mutex<Option<TitleGuard>>,
    sink: Arc<dyn TitleSink>,
    default_title: String,
}

impl Shared {
    /// Drop the current title guard (restoring the default) and, if
    /// given, show a new title. Only called inside a state update.
    fn retitle(&self, title: Option<&str>) {
        let mut slot = self.title.lock().unwrap_or_else(PoisonError::into_inner);
        drop(slot.take());
        *slot = title.map(|t| TitleGuard::acquire(Arc::clone(&self.sink), t, &*self.default_title));
    }
}

/// Drives the detail pane for the selected movie.
pub struct DetailController {
    catalog: Arc<dyn MovieCatalog>,
    shared: Arc<Shared>,
    current: Option<CancellationToken>,
    selected: Option<MovieId>,
    pending_rating: u8,
    rating_decisions: u32,
}

impl DetailController {
    /// Controller restoring [`DEFAULT_TITLE`] whenever no detail is shown
    pub fn new(catalog: Arc<dyn MovieCatalog>, sink: Arc<dyn TitleSink>) -> Self {
        Self::with_default_title(catalog, sink, DEFAULT_TITLE)
    }

    pub fn with_default_title(
        catalog: Arc<dyn MovieCatalog>,
        sink: Arc<dyn TitleSink>,
        default_title: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            catalog,
            shared: Arc::new(Shared {
                state,
                title: Mutex::new(None),
                sink,
                default_title: default_title.into(),
            }),
            current: None,
            selected: None,
            pending_rating: 0,
            rating_decisions: 0,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.shared.state.subscribe()
    }

    pub fn state(&self) -> DetailState {
        self.shared.state.borrow().clone()
    }

    pub fn selected(&self) -> Option<&MovieId> {
        self.selected.as_ref()
    }

    /// Change the selection.
    ///
    /// `None` clears the detail without fetching. `Some(id)` starts a fetch
    /// and returns its handle. Either way the previous fetch is cancelled,
    /// the title reverts to the default and the pending rating resets.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn select(&mut self, id: Option<MovieId>) -> Option<JoinHandle<()>> {
        let previous = self.current.take();
        self.pending_rating = 0;
        self.rating_decisions = 0;
        self.selected.clone_from(&id);

        let shared = &self.shared;
        shared.state.send_modify(|state| {
            if let Some(token) = &previous {
                token.cancel();
            }
            shared.retitle(None);
            *state = if id.is_some() {
                LoadState::Loading
            } else {
                LoadState::Idle
            };
        });

        let id = id?;
        let token = CancellationToken::new();
        self.current = Some(token.clone());
        debug!(id = %id, "Loading movie detail");

        let catalog = Arc::clone(&self.catalog);
        let shared = Arc::clone(&self.shared);
        Some(tokio::spawn(async move {
            let outcome = catalog.get_detail(&id, &token).await;
            apply(&shared, &token, &id, outcome);
        }))
    }

    /// Select `id`, or close the detail if `id` is already selected.
    pub fn toggle(&mut self, id: MovieId) -> Option<JoinHandle<()>> {
        if self.selected.as_ref() == Some(&id) {
            self.close();
            None
        } else {
            self.select(Some(id))
        }
    }

    pub fn close(&mut self) {
        // Clearing never spawns
        let _ = self.select(None);
    }

    /// Rating the user is about to give the selected movie, 0 if none yet
    pub fn pending_rating(&self) -> u8 {
        self.pending_rating
    }

    /// Number of times the pending rating changed since selection
    pub fn rating_decisions(&self) -> u32 {
        self.rating_decisions
    }

    /// Set the pending rating (1 to 10).
    ///
    /// # Errors
    ///
    /// `InvalidInput` if nothing is selected, the detail has not loaded,
    /// or `rating` is out of range.
    pub fn rate(&mut self, rating: u8) -> Result<()> {
        if self.selected.is_none() {
            return Err(PopcornError::invalid_input("no movie selected"));
        }
        if self.shared.state.borrow().ready().is_none() {
            return Err(PopcornError::invalid_input("no movie detail loaded"));
        }
        if !(1..=MAX_USER_RATING).contains(&rating) {
            return Err(PopcornError::invalid_input(format!(
                "rating must be between 1 and {MAX_USER_RATING}, got {rating}"
            )));
        }

        if rating != self.pending_rating {
            self.pending_rating = rating;
            self.rating_decisions += 1;
        }
        Ok(())
    }

    /// Whether the selected movie is on `watched`
    pub fn is_watched(&self, watched: &[WatchedMovie]) -> bool {
        self.watched_rating(watched).is_some()
    }

    /// The rating recorded for the selected movie, if it was watched
    pub fn watched_rating(&self, watched: &[WatchedMovie]) -> Option<u8> {
        let id = self.selected.as_ref()?;
        watched.iter().find(|m| &m.id == id).map(|m| m.user_rating)
    }

    /// Whether "add to list" should be offered
    pub fn can_add(&self, watched: &[WatchedMovie]) -> bool {
        self.shared.state.borrow().ready().is_some()
            && self.pending_rating > 0
            && !self.is_watched(watched)
    }

    /// Turn the loaded detail and the pending rating into a list entry.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if no detail is loaded or no rating is pending,
    /// `Duplicate` if the movie is already on `watched`.
    pub fn build_watched(&self, watched: &[WatchedMovie]) -> Result<WatchedMovie> {
        let state = self.shared.state.borrow();
        let Some(detail) = state.ready() else {
            return Err(PopcornError::invalid_input("no movie detail loaded"));
        };
        if self.pending_rating == 0 {
            return Err(PopcornError::invalid_input("rate the movie first"));
        }
        if watched.iter().any(|m| m.id == detail.id) {
            return Err(PopcornError::Duplicate(detail.id.clone()));
        }

        Ok(WatchedMovie::from_detail(
            detail,
            self.pending_rating,
            self.rating_decisions,
        ))
    }
}

impl Drop for DetailController {
    fn drop(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
        self.shared.retitle(None);
    }
}

fn apply(
    shared: &Shared,
    token: &CancellationToken,
    id: &MovieId,
    outcome: FetchResult<MovieDetail>,
) {
    let applied = shared.state.send_if_modified(|state| {
        if token.is_cancelled() {
            return false;
        }
        match &outcome {
            Ok(detail) => {
                shared.retitle(Some(&detail.title));
                *state = LoadState::Ready(detail.clone());
                true
            }
            Err(FetchError::Cancelled) => false,
            Err(_) => {
                *state = LoadState::Failed(DETAIL_ERROR_MESSAGE.to_string());
                true
            }
        }
    });

    match (&outcome, applied) {
        (Ok(detail), true) => debug!(id = %id, title = %detail.title, "Movie detail loaded"),
        (Err(e), true) => warn!(id = %id, error = %e, "Failed to load movie detail"),
        (_, false) => debug!(id = %id, "Stale detail outcome discarded"),
    }
}
