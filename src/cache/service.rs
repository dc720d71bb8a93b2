//! Read-through cache service
//!
//! Wraps the shared [`CacheStore`] behind typed helpers: values are stored as
//! JSON, loaded from the repository on a miss, and invalidated by key or by
//! namespace after writes.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStats, CacheStore, Namespace};
use crate::error::{AppError, CacheError};

/// Cloneable handle to the shared cache.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    store: Arc<RwLock<CacheStore>>,
}

impl CatalogCache {
    pub fn new(max_entries: usize) -> Self {
        Self::from_store(CacheStore::new(max_entries))
    }

    pub fn from_store(store: CacheStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Shared store, for the background expiry sweep.
    pub fn shared_store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }

    // == Remember ==
    /// Returns the cached value for `key`, or runs `load`, caches its result
    /// for `ttl`, and returns it.
    ///
    /// Errors from `load` are returned and nothing is cached. A value that
    /// cannot be cached (too large, undecodable) is still returned.
    pub async fn remember<T, F, Fut>(
        &self,
        key: &CacheKey,
        ttl: Duration,
        load: F,
    ) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Some(value) = self.get::<T>(key).await {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }

        debug!(key = %key, "cache miss");
        let value = load().await?;

        if let Err(err) = self.put(key, &value, ttl).await {
            warn!(key = %key, error = %err, "failed to cache value");
        }
        Ok(value)
    }

    /// Cached value for `key`, dropping entries that no longer decode.
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let mut store = self.store.write().await;
        let raw = store.get(key.as_str())?;

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key = %key, error = %err, "dropping undecodable cache entry");
                store.forget(key.as_str());
                None
            }
        }
    }

    pub async fn put<T: Serialize>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let encoded =
            serde_json::to_string(value).map_err(|e| CacheError::Codec(e.to_string()))?;
        self.store.write().await.set(key.as_str(), encoded, ttl)
    }

    // == Invalidation ==
    pub async fn forget(&self, key: &CacheKey) -> bool {
        self.store.write().await.forget(key.as_str())
    }

    /// Evicts every key in `namespace`. Returns how many were removed.
    pub async fn forget_namespace(&self, namespace: Namespace) -> usize {
        let removed = self.store.write().await.forget_prefix(namespace.prefix());
        debug!(namespace = namespace.prefix(), removed, "namespace evicted");
        removed
    }

    /// Evicts everything, in every namespace.
    pub async fn flush(&self) -> usize {
        self.store.write().await.flush()
    }

    pub async fn contains(&self, key: &CacheKey) -> bool {
        self.store.read().await.contains(key.as_str())
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_remember_loads_once() {
        let cache = CatalogCache::new(100);
        let calls = AtomicUsize::new(0);
        let key = CacheKey::product(1);

        for _ in 0..3 {
            let value: Vec<i32> = cache
                .remember(&key, TTL, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(vec![1, 2, 3]) }
                })
                .await
                .unwrap();
            assert_eq!(value, vec![1, 2, 3]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses), (2, 1));
    }

    #[tokio::test]
    async fn test_remember_does_not_cache_errors() {
        let cache = CatalogCache::new(100);
        let key = CacheKey::product(9);

        let result: Result<String, _> = cache
            .remember(&key, TTL, || async {
                Err(AppError::NotFound("Product not found.".to_string()))
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(!cache.contains(&key).await);
    }

    #[tokio::test]
    async fn test_remember_reloads_after_ttl() {
        let cache = CatalogCache::new(100);
        let key = CacheKey::all_categories();
        let ttl = Duration::from_millis(40);

        let first: u32 = cache.remember(&key, ttl, || async { Ok(1) }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(70)).await;
        let second: u32 = cache.remember(&key, ttl, || async { Ok(2) }).await.unwrap();

        assert_eq!((first, second), (1, 2));
    }

    #[tokio::test]
    async fn test_uncacheable_value_is_still_returned() {
        let cache = CatalogCache::new(100);
        let long_search = "s".repeat(400);
        let key = CacheKey::product_list(
            &crate::store::ProductFilter::by_search(long_search),
            1,
        );

        let value: String = cache
            .remember(&key, TTL, || async { Ok("fresh".to_string()) })
            .await
            .unwrap();

        assert_eq!(value, "fresh");
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let cache = CatalogCache::new(100);
        let key = CacheKey::product(1);
        cache.put(&key, &"text", TTL).await.unwrap();

        let decoded: Option<u64> = cache.get(&key).await;

        assert!(decoded.is_none());
        assert!(!cache.contains(&key).await);
    }

    #[tokio::test]
    async fn test_namespace_and_flush() {
        let cache = CatalogCache::new(100);
        cache.put(&CacheKey::all_categories(), &1, TTL).await.unwrap();
        cache.put(&CacheKey::product(1), &2, TTL).await.unwrap();
        cache
            .put(
                &CacheKey::product_list(&Default::default(), 1),
                &3,
                TTL,
            )
            .await
            .unwrap();

        assert_eq!(cache.forget_namespace(Namespace::Products).await, 2);
        assert!(cache.contains(&CacheKey::all_categories()).await);

        assert_eq!(cache.flush().await, 1);
        assert_eq!(cache.len().await, 0);
    }
}
