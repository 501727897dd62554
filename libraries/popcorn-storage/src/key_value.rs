//! Key/value slot storage
//!
//! Two `KeyValueStore` implementations: `SqliteKeyValueStore` for the
//! persistent local database and `MemoryKeyValueStore` for ephemeral
//! sessions and tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use popcorn_core::KeyValueStore;
//! use popcorn_storage::SqliteKeyValueStore;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteKeyValueStore::open("sqlite://popcorn.db").await?;
//!
//! store.set("watched", "[]").await?;
//! let value = store.get("watched").await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use popcorn_core::KeyValueStore;
use sqlx::SqlitePool;

use crate::error::StorageError;

/// `SQLite`-backed key/value slots
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Open (creating if missing) the database at `database_url` and apply
    /// the schema.
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn open(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::create_pool(database_url).await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, applying the schema
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM key_value WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO key_value (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM key_value WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> popcorn_core::Result<Option<String>> {
        Ok(self.read(key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> popcorn_core::Result<()> {
        Ok(self.write(key, value).await?)
    }

    async fn remove(&self, key: &str) -> popcorn_core::Result<()> {
        Ok(self.delete(key).await?)
    }
}

/// In-memory key/value slots; contents vanish with the value
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate one slot
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store.lock().insert(key.into(), value.into());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> popcorn_core::Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> popcorn_core::Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> popcorn_core::Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}
