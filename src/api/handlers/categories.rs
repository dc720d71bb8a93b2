//! Category handlers

use axum::{extract::State, Json};
use tracing::info;

use crate::api::AppState;
use crate::cache::CacheKey;
use crate::error::{AppError, Result};
use crate::models::{CategoryWithChildren, MessageResponse};

/// Handler for GET /v1/categories
///
/// Top-level categories with their direct children, read through the cache.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithChildren>>> {
    let categories = state.repos.categories.clone();

    let tree = state
        .cache
        .remember(&CacheKey::all_categories(), state.settings.category_ttl, move || async move {
            categories.all().await.map_err(AppError::from)
        })
        .await?;

    Ok(Json(tree))
}

/// Handler for GET /v1/categories/clear-cache
///
/// Flushes the whole cache, every namespace included.
pub async fn clear_cache(State(state): State<AppState>) -> Json<MessageResponse> {
    let removed = state.cache.flush().await;
    info!(removed, "cache flushed");

    Json(MessageResponse::new("Category cache cleared successfully"))
}
