//! Popcorn Lifecycle
//!
//! Controllers that turn user intent (a search query, a selected movie)
//! into catalog requests and publish the resulting state.
//!
//! Only the most recently issued request of each controller may change
//! its state. Each request carries a `CancellationToken`; issuing a new
//! one cancels the old token in the same `watch` update that resets the
//! state, so a late response has nothing to write to.
//!
//! # Example
//!
//! ```rust,ignore
//! use popcorn_lifecycle::SearchController;
//!
//! let mut search = SearchController::new(catalog);
//! let mut updates = search.subscribe();
//!
//! search.set_query("inter");
//! search.set_query("interstellar"); // "inter" can no longer land
//!
//! let state = updates.wait_for(|s| !s.is_loading()).await?;
//! for movie in state.results() {
//!     println!("{} ({})", movie.title, movie.year);
//! }
//! ```

#![forbid(unsafe_code)]

mod detail;
mod search;
mod state;

pub use detail::{DetailController, DETAIL_ERROR_MESSAGE, MAX_USER_RATING};
pub use search::SearchController;
pub use state::{DetailState, LoadState, SearchState};
