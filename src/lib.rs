//! Catalog Service - categories and products over a REST API
//!
//! Product and category reads go through an in-memory TTL cache in front of
//! the data store; product writes evict the cache entries they make stale.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod store;
pub mod tasks;
pub mod validation;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
