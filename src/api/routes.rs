//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_cache, create_product, delete_product, health_handler,
    list_categories, list_products, show_product, update_product,
};
use super::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let v1 = Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/clear-cache", get(clear_cache))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(show_product).put(update_product).delete(delete_product),
        );

    Router::new()
        .nest("/v1", v1)
        .route("/health", get(health_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
