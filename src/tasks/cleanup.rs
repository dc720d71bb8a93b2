//! Cache Expiry Sweep
//!
//! Background task that periodically drops expired cache entries so stale
//! listings do not sit in memory until the next read of the same key.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CatalogCache;

/// Spawns the sweep task, running every `interval`.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: CatalogCache, interval: Duration) -> JoinHandle<()> {
    let store = cache.shared_store();

    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs_f64(), "cache sweep started");

        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = store.write().await.cleanup_expired();
            if removed > 0 {
                info!(removed, "cache sweep removed expired entries");
            } else {
                debug!("cache sweep found nothing to remove");
            }
        }
    })
}
