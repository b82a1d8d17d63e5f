//! Diagnostics handlers: cache statistics, manual cache invalidation, and
//! the health probe. None of these require authentication.

use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use crate::api::AppState;
use crate::models::{CacheDeleteResponse, CacheStatsResponse, HealthResponse};

// == Cache Stats ==
/// Handler for GET /cache/stats
///
/// Hit/miss counters plus a snapshot of the stored keys. The snapshot may
/// list keys whose entries have already outlived the TTL; enumerating does
/// not expire them.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let cache = state.cache.read().await;
    Json(CacheStatsResponse::new(&cache.stats(), cache.keys()))
}

// == Cache Delete ==
/// Handler for DELETE /cache/keys/:key
///
/// Drops one cache entry by its composite key. Deleting an absent key is
/// not an error; the next feed request simply repopulates.
pub async fn cache_delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<CacheDeleteResponse> {
    state.cache.write().await.del(&key);
    info!("Cache key evicted by request: {}", key);
    Json(CacheDeleteResponse::new(key))
}

// == Health ==
/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::cache::FeedCache;
    use crate::config::Config;
    use crate::news::StubProvider;
    use crate::storage::Database;

    fn test_state() -> AppState {
        AppState::new(
            FeedCache::default(),
            Database::open_in_memory().unwrap(),
            Arc::new(StubProvider::default()),
            Config::default(),
        )
    }

    #[tokio::test]
    async fn test_cache_stats_reflect_activity() {
        let state = test_state();
        {
            let mut cache = state.cache.write().await;
            cache.set("general|en|us", Arc::new(Vec::new()));
            cache.get("general|en|us");
            cache.get("missing");
        }

        let stats = cache_stats_handler(State(state)).await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.keys, vec!["general|en|us".to_string()]);
    }

    #[tokio::test]
    async fn test_cache_delete_removes_entry() {
        let state = test_state();
        state
            .cache
            .write()
            .await
            .set("general|en|us", Arc::new(Vec::new()));

        let response = cache_delete_handler(State(state.clone()), Path("general|en|us".to_string()))
            .await;
        assert_eq!(response.key, "general|en|us");
        assert!(response.message.contains("general|en|us"));

        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_cache_delete_missing_key_still_succeeds() {
        let state = test_state();

        let response =
            cache_delete_handler(State(state), Path("no_such_key".to_string())).await;
        assert_eq!(response.key, "no_such_key");
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.timestamp.is_empty());
    }
}
