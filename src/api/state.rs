//! Shared application state

use std::time::Duration;

use crate::cache::CatalogCache;
use crate::config::Config;
use crate::error::StoreError;
use crate::repository::Repositories;
use crate::store::CatalogStore;

/// TTLs and page size used by the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub category_ttl: Duration,
    pub product_list_ttl: Duration,
    pub product_ttl: Duration,
    pub products_per_page: u64,
}

impl From<&Config> for CacheSettings {
    fn from(config: &Config) -> Self {
        Self {
            category_ttl: config.category_cache_ttl,
            product_list_ttl: config.product_list_cache_ttl,
            product_ttl: config.product_cache_ttl,
            products_per_page: config.products_per_page,
        }
    }
}

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub cache: CatalogCache,
    pub settings: CacheSettings,
}

impl AppState {
    pub fn new(repos: Repositories, cache: CatalogCache, settings: CacheSettings) -> Self {
        Self {
            repos,
            cache,
            settings,
        }
    }

    /// Connects to the configured database and builds the state around it.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store =
            CatalogStore::connect(&config.database_url, config.database_max_connections).await?;

        Ok(Self::new(
            Repositories::from_store(store),
            CatalogCache::new(config.cache_max_entries),
            CacheSettings::from(config),
        ))
    }
}
