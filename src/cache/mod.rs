//! Cache Module
//!
//! In-memory read-through cache with TTL expiration, LRU eviction and
//! namespaced invalidation.

mod entry;
mod keys;
mod lru;
mod service;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use keys::{CacheKey, Namespace};
pub use lru::LruTracker;
pub use service::CatalogCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed serialized value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
