//! Popcorn Storage
//!
//! Local persistence for Popcorn: flat key/value slots in `SQLite` and the
//! watch list stored in one of those slots.
//!
//! # Example
//!
//! ```rust,no_run
//! use popcorn_storage::{SqliteKeyValueStore, WatchList};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteKeyValueStore::open("sqlite://popcorn.db").await?;
//! let watched = WatchList::load(Arc::new(store)).await;
//!
//! let summary = watched.summary();
//! println!("{} movies, avg rating {}", summary.count, summary.avg_user_rating_display());
//! # Ok(())
//! # }
//! ```

mod error;
mod key_value;
mod watch_list;

pub use error::StorageError;
pub use key_value::{MemoryKeyValueStore, SqliteKeyValueStore};
pub use watch_list::{WatchList, WATCHED_KEY};

use sqlx::sqlite::SqlitePool;

/// Run database migrations
///
/// Embedded so the schema is applied the same way from every binary and
/// test. Each migration is idempotent.
///
/// # Errors
///
/// Returns an error if a migration fails to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    const MIGRATIONS: &[&str] = &[include_str!(
        "../migrations/20250301000001_create_key_value.sql"
    )];

    for migration in MIGRATIONS {
        sqlx::query(migration)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;
    }

    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://popcorn.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // A single writer is all the watch list needs
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}
