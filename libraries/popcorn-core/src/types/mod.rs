//! Domain types for Popcorn

mod ids;
mod movie;
mod watched;

pub use ids::MovieId;
pub use movie::{parse_catalog_rating, parse_runtime_minutes, MovieDetail, MovieSummary, SearchResults};
pub use watched::WatchedMovie;
