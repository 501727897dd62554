//! The application composition
//!
//! `App` wires the search and detail lifecycles to the watch list and the
//! keyboard. Front ends only read snapshots from it and call its intent
//! methods.

use std::sync::Arc;

use popcorn_core::{
    Key, KeyBindings, MovieCatalog, MovieId, PopcornError, Result, Subscription, TitleSink,
    WatchedMovie, WatchedSummary,
};
use popcorn_lifecycle::{DetailController, DetailState, SearchController, SearchState};
use popcorn_storage::WatchList;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

/// What a key handler asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyIntent {
    CloseDetails,
    ClearQuery,
}

pub struct App {
    search: SearchController,
    details: DetailController,
    watched: WatchList,
    keys: KeyBindings,
    intent_tx: mpsc::UnboundedSender<KeyIntent>,
    intents: mpsc::UnboundedReceiver<KeyIntent>,
    _enter: Subscription,
    // Held only while a detail is open
    escape: Option<Subscription>,
}

impl App {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        watched: WatchList,
        title_sink: Arc<dyn TitleSink>,
        default_title: &str,
    ) -> Self {
        let keys = KeyBindings::new();
        let (intent_tx, intents) = mpsc::unbounded_channel();
        let enter = bind(&keys, Key::enter(), &intent_tx, KeyIntent::ClearQuery);

        Self {
            search: SearchController::new(Arc::clone(&catalog)),
            details: DetailController::with_default_title(catalog, title_sink, default_title),
            watched,
            keys,
            intent_tx,
            intents,
            _enter: enter,
            escape: None,
        }
    }

    // ===== Search =====

    /// Replace the query; see [`SearchController::set_query`]
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<JoinHandle<()>> {
        self.search.set_query(query)
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn search_state(&self) -> SearchState {
        self.search.state()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<SearchState> {
        self.search.subscribe()
    }

    // ===== Details =====

    /// Open `id`, or close it if it is already open
    pub fn toggle_selection(&mut self, id: MovieId) -> Option<JoinHandle<()>> {
        let handle = self.details.toggle(id);
        self.sync_escape();
        handle
    }

    /// Toggle the search result at `index` (0-based)
    pub fn toggle_result(&mut self, index: usize) -> Result<Option<JoinHandle<()>>> {
        let id = self
            .search
            .state()
            .results()
            .get(index)
            .map(|movie| movie.id.clone())
            .ok_or_else(|| PopcornError::invalid_input(format!("no search result #{}", index + 1)))?;
        Ok(self.toggle_selection(id))
    }

    /// Open `id` regardless of the current selection
    pub fn open(&mut self, id: MovieId) -> Option<JoinHandle<()>> {
        let handle = self.details.select(Some(id));
        self.sync_escape();
        handle
    }

    pub fn close_details(&mut self) {
        self.details.close();
        self.sync_escape();
    }

    pub fn detail_state(&self) -> DetailState {
        self.details.state()
    }

    pub fn subscribe_details(&self) -> watch::Receiver<DetailState> {
        self.details.subscribe()
    }

    pub fn selected(&self) -> Option<&MovieId> {
        self.details.selected()
    }

    pub fn pending_rating(&self) -> u8 {
        self.details.pending_rating()
    }

    /// Rating recorded for the open movie, if it is already watched
    pub fn watched_rating(&self) -> Option<u8> {
        self.details.watched_rating(self.watched.movies())
    }

    pub fn can_add(&self) -> bool {
        self.details.can_add(self.watched.movies())
    }

    pub fn rate(&mut self, rating: u8) -> Result<()> {
        self.details.rate(rating)
    }

    /// Add the open movie with the pending rating, then close the detail.
    pub async fn add_selected(&mut self) -> Result<WatchedMovie> {
        let movie = self.details.build_watched(self.watched.movies())?;
        self.watched.add(movie.clone()).await?;
        self.close_details();
        Ok(movie)
    }

    // ===== Watch list =====

    pub async fn remove_watched(&mut self, id: &MovieId) -> Result<bool> {
        self.watched.remove(id).await
    }

    pub fn watched(&self) -> &WatchList {
        &self.watched
    }

    pub fn summary(&self) -> WatchedSummary {
        self.watched.summary()
    }

    // ===== Keyboard =====

    pub fn keys(&self) -> &KeyBindings {
        &self.keys
    }

    /// Feed a key press through the bindings and apply what the handlers
    /// asked for. Returns how many handlers ran.
    pub fn press(&mut self, key: &Key) -> usize {
        let handled = self.keys.dispatch(key);

        while let Ok(intent) = self.intents.try_recv() {
            debug!(?intent, "Key intent");
            match intent {
                KeyIntent::CloseDetails => self.close_details(),
                KeyIntent::ClearQuery => {
                    // Clearing never spawns
                    let _ = self.set_query("");
                }
            }
        }
        handled
    }

    /// Escape is bound exactly while a detail is open
    fn sync_escape(&mut self) {
        let open = self.details.selected().is_some();
        if open && self.escape.is_none() {
            self.escape = Some(bind(
                &self.keys,
                Key::escape(),
                &self.intent_tx,
                KeyIntent::CloseDetails,
            ));
        } else if !open {
            self.escape = None;
        }
    }
}

fn bind(
    keys: &KeyBindings,
    key: Key,
    tx: &mpsc::UnboundedSender<KeyIntent>,
    intent: KeyIntent,
) -> Subscription {
    let tx = tx.clone();
    keys.subscribe(key, move || {
        // The receiver lives as long as the app
        let _ = tx.send(intent);
    })
}
