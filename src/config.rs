//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite connection string
    pub database_url: String,
    /// Upper bound of the connection pool (in-memory databases always use 1)
    pub database_max_connections: u32,
    /// Maximum number of entries the cache can hold
    pub cache_max_entries: usize,
    /// Interval between expiry sweeps of the cache
    pub cache_cleanup_interval: Duration,
    /// TTL of the cached category listing
    pub category_cache_ttl: Duration,
    /// TTL of cached product listing pages
    pub product_list_cache_ttl: Duration,
    /// TTL of cached single products
    pub product_cache_ttl: Duration,
    /// Page size of product listings
    pub products_per_page: u64,
    /// Seed demo categories into an empty store at startup
    pub seed_demo_data: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_URL` - SQLite connection string (default: `sqlite::memory:`)
    /// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `CATEGORY_CACHE_TTL` - Category listing TTL in seconds (default: 1800)
    /// - `PRODUCT_LIST_CACHE_TTL` - Product listing TTL in seconds (default: 1800)
    /// - `PRODUCT_CACHE_TTL` - Single product TTL in seconds (default: 600)
    /// - `PRODUCTS_PER_PAGE` - Listing page size (default: 10)
    /// - `SEED_DEMO_DATA` - `true`/`false` (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.database_url),
            database_max_connections: env_or(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )
            .max(1),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries).max(1),
            cache_cleanup_interval: env_secs("CACHE_CLEANUP_INTERVAL", defaults.cache_cleanup_interval)
                .max(Duration::from_secs(1)),
            category_cache_ttl: env_secs("CATEGORY_CACHE_TTL", defaults.category_cache_ttl),
            product_list_cache_ttl: env_secs(
                "PRODUCT_LIST_CACHE_TTL",
                defaults.product_list_cache_ttl,
            ),
            product_cache_ttl: env_secs("PRODUCT_CACHE_TTL", defaults.product_cache_ttl),
            products_per_page: env_or("PRODUCTS_PER_PAGE", defaults.products_per_page).max(1),
            seed_demo_data: env_or("SEED_DEMO_DATA", defaults.seed_demo_data),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 5,
            cache_max_entries: 1000,
            cache_cleanup_interval: Duration::from_secs(60),
            category_cache_ttl: Duration::from_secs(30 * 60),
            product_list_cache_ttl: Duration::from_secs(30 * 60),
            product_cache_ttl: Duration::from_secs(10 * 60),
            products_per_page: crate::models::DEFAULT_PER_PAGE,
            seed_demo_data: true,
        }
    }
}

/// Parses `name`, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_secs(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.cache_max_entries, 1000);
        assert_eq!(config.category_cache_ttl, Duration::from_secs(1800));
        assert_eq!(config.product_list_cache_ttl, Duration::from_secs(1800));
        assert_eq!(config.product_cache_ttl, Duration::from_secs(600));
        assert_eq!(config.products_per_page, 10);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_env_helpers_fall_back_on_garbage() {
        // Names unique to this test so parallel tests cannot interfere
        env::set_var("CATALOG_TEST_PORT", "not-a-port");
        env::set_var("CATALOG_TEST_TTL", " 42 ");

        assert_eq!(env_or("CATALOG_TEST_PORT", 8080u16), 8080);
        assert!(env_or("CATALOG_TEST_UNSET", true));
        assert_eq!(env_secs("CATALOG_TEST_TTL", Duration::ZERO), Duration::from_secs(42));

        env::remove_var("CATALOG_TEST_PORT");
        env::remove_var("CATALOG_TEST_TTL");
    }
}
