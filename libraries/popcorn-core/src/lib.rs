//! Popcorn Core
//!
//! Platform-agnostic types, traits, and error handling for Popcorn.
//!
//! This crate provides the building blocks shared by the catalog client,
//! the watch-list storage, the lifecycle controllers and the CLI.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MovieSummary`, `MovieDetail`, `WatchedMovie`
//! - **Core Traits**: `MovieCatalog`, `KeyValueStore`, `TitleSink`
//! - **Derived Views**: `WatchedSummary` (count and averages)
//! - **Scoped Capabilities**: `KeyBindings` subscriptions and `TitleGuard`
//! - **Error Handling**: Unified `PopcornError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use popcorn_core::{MovieId, WatchedMovie, WatchedSummary};
//!
//! let watched = vec![WatchedMovie {
//!     id: MovieId::new("tt0111161"),
//!     title: "The Shawshank Redemption".to_string(),
//!     year: "1994".to_string(),
//!     poster_url: String::new(),
//!     runtime_minutes: 142,
//!     catalog_rating: 9.3,
//!     user_rating: 9,
//!     rating_decisions: 1,
//! }];
//!
//! let summary = WatchedSummary::from_movies(&watched);
//! assert_eq!(summary.count, 1);
//! assert_eq!(summary.avg_runtime_display(), "142.00");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod keys;
pub mod summary;
pub mod title;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{FetchError, FetchResult, PopcornError, Result};
pub use keys::{Key, KeyBindings, Subscription};
pub use summary::WatchedSummary;
pub use title::{TitleGuard, DEFAULT_TITLE};
pub use traits::{KeyValueStore, MovieCatalog, TitleSink};

pub use types::{
    parse_catalog_rating, parse_runtime_minutes, MovieDetail, MovieId, MovieSummary,
    SearchResults, WatchedMovie,
};
