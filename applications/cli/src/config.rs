/// Application configuration
use crate::error::{AppError, Result};
use popcorn_catalog_client::CatalogConfig;
use popcorn_core::DEFAULT_TITLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "popcorn.toml";

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "popcorn=info,popcorn_cli=info,popcorn_core=info,\
popcorn_lifecycle=info,popcorn_storage=info,popcorn_catalog_client=info";

/// Environment variables mapped onto config keys
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("catalog.api_key", "POPCORN_CATALOG_API_KEY"),
    ("catalog.base_url", "POPCORN_CATALOG_BASE_URL"),
    ("storage.database_url", "POPCORN_STORAGE_DATABASE_URL"),
    ("app.default_title", "POPCORN_APP_DEFAULT_TITLE"),
];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PopcornConfig {
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_app")]
    pub app: AppSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppSettings {
    #[serde(default = "default_title")]
    pub default_title: String,
}

impl PopcornConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `popcorn.toml`; an explicit path must
    /// exist, the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Nested keys from the environment (POPCORN_CATALOG__API_KEY, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("POPCORN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // The documented single-underscore names win
        for (key, var) in ENV_OVERRIDES {
            settings = settings
                .set_override_option(*key, std::env::var(var).ok())
                .map_err(|e| AppError::Config(e.to_string()))?;
        }

        let config = settings
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "Catalog API key is required (set POPCORN_CATALOG_API_KEY)".to_string(),
            ));
        }

        if self.catalog.base_url.trim().is_empty() {
            return Err(AppError::Config("Catalog base URL cannot be empty".to_string()));
        }

        if !self.storage.database_url.starts_with("sqlite:") {
            return Err(AppError::Config(format!(
                "Unsupported database URL {:?} (expected sqlite://...)",
                self.storage.database_url
            )));
        }

        Ok(())
    }

    /// Client configuration for the movie catalog
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(&self.catalog.base_url, &self.catalog.api_key)
    }

    /// Local file behind `storage.database_url`, if it names one
    pub fn database_path(&self) -> Option<PathBuf> {
        let path = self
            .storage
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.storage.database_url.strip_prefix("sqlite:"))?;
        let path = path.split('?').next().unwrap_or(path);

        if path.is_empty() || path == ":memory:" {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        base_url: default_base_url(),
        api_key: String::new(),
    }
}

fn default_base_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/popcorn.db".to_string()
}

fn default_app() -> AppSettings {
    AppSettings {
        default_title: default_title(),
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for PopcornConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            storage: default_storage(),
            app: default_app(),
        }
    }
}
