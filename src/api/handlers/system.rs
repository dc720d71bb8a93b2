//! Operational handlers

use axum::{extract::State, Json};

use crate::api::AppState;
use crate::models::{HealthResponse, StatsResponse};

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_cache_stats_handler() {
        let state = AppState::from_config(&Config::default()).await.unwrap();

        let response = cache_stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.total_entries, 0);
    }
}
