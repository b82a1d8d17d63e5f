//! API Module
//!
//! HTTP handlers and routing for the news backend REST API.
//!
//! # Endpoints
//! - `POST /users/signup`, `POST /users/login` - Accounts
//! - `GET /users/preferences`, `PUT /users/preferences` - Feed preferences
//! - `GET /news` - Preference-driven, TTL-cached headline feed
//! - `GET /news/saved` - Recently persisted articles
//! - `GET /news/search/:keyword` - Uncached upstream search
//! - `POST /news/:id/read`, `POST /news/:id/favorite` - Article marks
//! - `GET /news/read`, `GET /news/favorites` - Marked articles
//! - `GET /cache/stats`, `DELETE /cache/keys/:key` - Cache diagnostics
//! - `GET /health` - Health check endpoint

pub mod auth;
pub mod diagnostics;
pub mod news;
pub mod preferences;
pub mod routes;

pub use routes::create_router;

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::FeedCache;
use crate::config::Config;
use crate::news::NewsProvider;
use crate::storage::Database;

// == App State ==
/// Application state shared across all handlers and the refresh task.
///
/// Every collaborator is constructed at startup and injected here; there
/// are no globals. The cache sits behind a `tokio::sync::RwLock` whose
/// write lock serializes reads too, because a cache `get` removes the
/// entry it finds expired.
#[derive(Clone)]
pub struct AppState {
    /// Feed cache keyed by `feed_key` strings
    pub cache: Arc<RwLock<FeedCache>>,
    /// Embedded persistent store
    pub db: Arc<Database>,
    /// Upstream article source
    pub provider: Arc<dyn NewsProvider>,
    /// Runtime configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state from already-built parts.
    pub fn new(
        cache: FeedCache,
        db: Database,
        provider: Arc<dyn NewsProvider>,
        config: Config,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            db: Arc::new(db),
            provider,
            config: Arc::new(config),
        }
    }
}
