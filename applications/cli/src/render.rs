//! Plain-text views over app snapshots

use std::fmt::Write;

use popcorn_core::{MovieDetail, WatchedMovie, WatchedSummary};
use popcorn_lifecycle::{DetailState, LoadState, SearchState};

pub const LOADING: &str = "Loading...";

/// Result count line plus the numbered hits, or the loading/error line.
pub fn search(state: &SearchState) -> String {
    match state {
        LoadState::Loading => LOADING.to_string(),
        LoadState::Failed(message) => format!("⛔ {message}"),
        LoadState::Idle | LoadState::Ready(_) => {
            let movies = state.results();
            let total = state.ready().map_or(0, |results| results.total_results);
            let mut out = if total > movies.len() {
                format!("Found {} of {total} results", movies.len())
            } else {
                format!("Found {} results", movies.len())
            };
            for (i, movie) in movies.iter().enumerate() {
                let _ = write!(out, "\n{:>3}. {} (🗓 {})  [{}]", i + 1, movie.title, movie.year, movie.id);
            }
            out
        }
    }
}

/// Detail pane; `watched_rating` is the user's recorded rating if watched
pub fn detail(state: &DetailState, watched_rating: Option<u8>, pending_rating: u8) -> String {
    match state {
        LoadState::Idle => String::new(),
        LoadState::Loading => LOADING.to_string(),
        LoadState::Failed(message) => format!("⛔ {message}"),
        LoadState::Ready(movie) => detail_card(movie, watched_rating, pending_rating),
    }
}

fn detail_card(movie: &MovieDetail, watched_rating: Option<u8>, pending_rating: u8) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", movie.title, movie.year);
    let _ = writeln!(out, "{} • {}", movie.release_date, movie.runtime);
    let _ = writeln!(out, "{}", movie.genre);
    let _ = writeln!(out, "⭐ {} IMDb rating", movie.catalog_rating_display());

    match watched_rating {
        Some(rating) => {
            let _ = writeln!(
                out,
                "Already watched ✅ - You gave this movie a rating of ⭐ {rating} stars"
            );
        }
        None if pending_rating > 0 => {
            let _ = writeln!(out, "Your rating: {pending_rating}/10 (:add to add to list)");
        }
        None => {
            let _ = writeln!(out, "Rate this movie with :rate 1-10");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", movie.plot);
    let _ = writeln!(out, "Starring {}", movie.actors);
    let _ = write!(out, "Directed by {}", movie.director);
    out
}

pub fn summary(summary: &WatchedSummary) -> String {
    format!(
        "MOVIES YOU WATCHED\n#️⃣ {} movies  ⭐️ {}  🌟 {}  ⏳ {} min",
        summary.count,
        summary.avg_catalog_rating_display(),
        summary.avg_user_rating_display(),
        summary.avg_runtime_display(),
    )
}

pub fn watched_list(movies: &[WatchedMovie]) -> String {
    movies
        .iter()
        .map(|movie| {
            format!(
                "{} ({})  ⭐️ {}  🌟 {}  ⏳ {} min  [{}]",
                movie.title,
                movie.year,
                movie.catalog_rating,
                movie.user_rating,
                movie.runtime_minutes,
                movie.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
