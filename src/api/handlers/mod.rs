//! API Handlers
//!
//! HTTP request handlers, one module per resource.

mod categories;
mod products;
mod system;

pub use categories::{clear_cache, list_categories};
pub use products::{create_product, delete_product, list_products, show_product, update_product};
pub use system::{cache_stats_handler, health_handler};
