//! API Handlers
//!
//! HTTP request handlers for each admin endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::CacheRegistry;
use crate::error::{AppError, Result};
use crate::models::{CacheStatsResponse, ClearResponse, HealthResponse};

/// Application state shared across all handlers.
///
/// The registry is itself a cheap clone around shared state.
#[derive(Clone)]
pub struct AppState {
    pub registry: CacheRegistry,
}

impl AppState {
    pub fn new(registry: CacheRegistry) -> Self {
        Self { registry }
    }
}

/// Handler for GET /caches
///
/// Returns statistics for every registered cache, sorted by name.
pub async fn list_caches_handler(State(state): State<AppState>) -> Json<Vec<CacheStatsResponse>> {
    let mut caches: Vec<CacheStatsResponse> = state
        .registry
        .snapshot()
        .iter()
        .map(|cache| CacheStatsResponse::from_cache(cache.as_ref()))
        .collect();
    caches.sort_by(|a, b| a.name.cmp(&b.name));

    Json(caches)
}

/// Handler for GET /caches/:name
pub async fn cache_stats_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CacheStatsResponse>> {
    let cache = state
        .registry
        .find_by_name(&name)
        .ok_or_else(|| AppError::NotFound(format!("No cache named '{}'", name)))?;

    Ok(Json(CacheStatsResponse::from_cache(cache.as_ref())))
}

/// Handler for DELETE /caches/:name
///
/// Drops every cached entry; the backing store is untouched.
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ClearResponse>> {
    let cache = state
        .registry
        .find_by_name(&name)
        .ok_or_else(|| AppError::NotFound(format!("No cache named '{}'", name)))?;

    cache.clear();
    info!(cache = %name, "Cache cleared via admin API");

    Ok(Json(ClearResponse::new(name)))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.registry.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::models::{Patient, User};

    fn state() -> AppState {
        let registry = CacheRegistry::new();
        let patients = registry.register_or_get::<Patient>(CacheConfig::default());
        registry.register_or_get::<User>(CacheConfig::from_secs(20, 60));
        patients.put("alice".to_string(), Patient::new("alice", "Alice", "Smith"));
        AppState::new(registry)
    }

    #[tokio::test]
    async fn test_list_caches_sorted() {
        let response = list_caches_handler(State(state())).await;

        let names: Vec<&str> = response.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Patient", "User"]);
        assert_eq!(response[0].total_entries, 1);
        assert_eq!(response[1].capacity, 20);
    }

    #[tokio::test]
    async fn test_cache_stats_unknown_name() {
        let result = cache_stats_handler(State(state()), Path("Visit".to_string())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear_cache_handler() {
        let state = state();

        let result = clear_cache_handler(State(state.clone()), Path("Patient".to_string())).await;
        assert!(result.is_ok());

        let stats = cache_stats_handler(State(state), Path("Patient".to_string()))
            .await
            .unwrap();
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(state())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.caches, 2);
    }
}
