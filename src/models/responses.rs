//! Response DTOs
//!
//! Outgoing HTTP response bodies. Field names follow the wire convention
//! the original API established (camelCase), which clients already parse.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Article, Preferences, SlimArticle, User};

// == Auth Response ==
/// Body returned by signup and login: the account plus a fresh bearer token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    /// Creates an AuthResponse for the given user and token.
    pub fn new(user: &User, token: impl Into<String>) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            token: token.into(),
        }
    }
}

// == Feed Response ==
/// Body for `GET /news`: the slim feed plus whether it came from the cache.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub from_cache: bool,
    pub count: usize,
    pub articles: Vec<SlimArticle>,
}

impl FeedResponse {
    /// Creates a FeedResponse; count is derived from the article list.
    pub fn new(from_cache: bool, articles: Vec<SlimArticle>) -> Self {
        Self {
            from_cache,
            count: articles.len(),
            articles,
        }
    }
}

// == Search Response ==
/// Body for `GET /news/search/:keyword`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub count: usize,
    pub articles: Vec<SlimArticle>,
}

impl SearchResponse {
    pub fn new(articles: Vec<SlimArticle>) -> Self {
        Self {
            count: articles.len(),
            articles,
        }
    }
}

// == Saved Response ==
/// Body for the persisted-article listings (`/news/saved`, `/news/read`,
/// `/news/favorites`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResponse {
    pub count: usize,
    pub articles: Vec<Article>,
}

impl SavedResponse {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            count: articles.len(),
            articles,
        }
    }
}

// == Preferences Response ==
/// Body for the preference endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PreferencesResponse {
    pub preferences: Preferences,
}

// == Mark Responses ==
/// Body for `POST /news/:id/read`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadResponse {
    pub message: String,
    pub read_articles: Vec<i64>,
}

impl MarkReadResponse {
    pub fn new(read_articles: Vec<i64>) -> Self {
        Self {
            message: "Marked read".to_string(),
            read_articles,
        }
    }
}

/// Body for `POST /news/:id/favorite`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkFavoriteResponse {
    pub message: String,
    pub favorite_articles: Vec<i64>,
}

impl MarkFavoriteResponse {
    pub fn new(favorite_articles: Vec<i64>) -> Self {
        Self {
            message: "Marked favorite".to_string(),
            favorite_articles,
        }
    }
}

// == Cache Stats Response ==
/// Body for `GET /cache/stats`.
///
/// The key snapshot comes from `keys()` and may list entries that are
/// already past their TTL; enumeration does not expire them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub hit_rate: f64,
    pub keys: Vec<String>,
}

impl CacheStatsResponse {
    /// Creates a CacheStatsResponse from cache statistics and a key snapshot.
    pub fn new(stats: &CacheStats, keys: Vec<String>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            entries: stats.entries,
            hit_rate: stats.hit_rate(),
            keys,
        }
    }
}

// == Cache Delete Response ==
/// Body for `DELETE /cache/keys/:key`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheDeleteResponse {
    pub message: String,
    pub key: String,
}

impl CacheDeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' removed", key),
            key,
        }
    }
}

// == Health Response ==
/// Body for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == Error Response ==
/// Error body for all failure conditions.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
