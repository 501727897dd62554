//! Wiring an `App` from configuration

use std::sync::Arc;

use popcorn_catalog_client::OmdbClient;
use popcorn_core::TitleSink;
use popcorn_storage::{SqliteKeyValueStore, WatchList};
use tracing::info;

use crate::app::App;
use crate::config::PopcornConfig;
use crate::error::Result;

/// Build the catalog client, open the local database and restore the
/// watch list.
pub async fn connect(config: &PopcornConfig, title_sink: Arc<dyn TitleSink>) -> Result<App> {
    config.validate()?;

    let catalog = OmdbClient::new(config.catalog_config())?;
    info!(url = %catalog.base_url(), "Catalog client ready");

    if let Some(parent) = config.database_path().as_deref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let store = SqliteKeyValueStore::open(&config.storage.database_url).await?;
    info!(url = %config.storage.database_url, "Database connected");

    let watched = WatchList::load(Arc::new(store)).await;

    Ok(App::new(
        Arc::new(catalog),
        watched,
        title_sink,
        &config.app.default_title,
    ))
}
