//! API Routes
//!
//! Configures the Axum router with all aggregator endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::{login_handler, signup_handler};
use super::diagnostics::{cache_delete_handler, cache_stats_handler, health_handler};
use super::news::{
    favorites_handler, feed_handler, mark_favorite_handler, mark_read_handler, read_handler,
    saved_handler, search_handler,
};
use super::preferences::{get_preferences_handler, update_preferences_handler};
use super::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /users/signup` - Create an account, returns a bearer token
/// - `POST /users/login` - Authenticate, returns a bearer token
/// - `GET /users/preferences` - Current category/language preferences
/// - `PUT /users/preferences` - Partially update preferences
/// - `GET /news` - Cached personalized headline feed
/// - `GET /news/saved` - Recently persisted articles
/// - `GET /news/search/:keyword` - Uncached keyword search
/// - `POST /news/:id/read` - Mark an article read
/// - `POST /news/:id/favorite` - Mark an article favorite
/// - `GET /news/read` - Articles this user marked read
/// - `GET /news/favorites` - Articles this user marked favorite
/// - `GET /cache/stats` - Cache hit/miss statistics and key snapshot
/// - `DELETE /cache/keys/:key` - Evict one cache entry
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/users/signup", post(signup_handler))
        .route(
            "/users/preferences",
            get(get_preferences_handler).put(update_preferences_handler),
        )
        .route("/users/login", post(login_handler))
        .route("/news", get(feed_handler))
        .route("/news/saved", get(saved_handler))
        .route("/news/search/:keyword", get(search_handler))
        .route("/news/:id/read", post(mark_read_handler))
        .route("/news/:id/favorite", post(mark_favorite_handler))
        .route("/news/read", get(read_handler))
        .route("/news/favorites", get(favorites_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/keys/:key", delete(cache_delete_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FeedCache;
    use crate::config::Config;
    use crate::news::StubProvider;
    use crate::storage::Database;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(
            FeedCache::default(),
            Database::open_in_memory().unwrap(),
            Arc::new(StubProvider::default()),
            Config::default(),
        );
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cache_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signup_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users/signup")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"name":"Ada","email":"ada@example.com","password":"hunter42"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_feed_requires_auth() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/news").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_news_listing_routes_are_wired() {
        let app = create_test_app();

        for uri in ["/news/read", "/news/favorites", "/news/saved"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "{} should reach its listing handler and fail auth",
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/no/such/route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
