//! Popcorn CLI Library
//!
//! Terminal front end for searching the movie catalog and keeping a
//! watch list. This library exposes the app composition for testing.

pub mod app;
pub mod config;
pub mod error;
pub mod interactive;
pub mod render;
pub mod session;
pub mod terminal;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::PopcornConfig;
pub use error::{AppError, Result};
pub use terminal::TerminalTitle;
