//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /v1/categories` - Top-level categories with their children
//! - `GET /v1/categories/clear-cache` - Flush the whole cache
//! - `GET /v1/products` - Filtered, paginated product listing
//! - `POST /v1/products` - Create a product
//! - `GET /v1/products/:id` - Fetch one product
//! - `PUT /v1/products/:id` - Partially update a product
//! - `DELETE /v1/products/:id` - Delete a product
//! - `GET /health` - Health check endpoint
//! - `GET /cache/stats` - Cache statistics

pub mod handlers;
pub mod routes;
mod state;

pub use handlers::*;
pub use routes::create_router;
pub use state::{AppState, CacheSettings};
