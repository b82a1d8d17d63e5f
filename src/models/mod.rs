//! Data models
//!
//! Domain types (articles, users, preferences) and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod article;
pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use article::{slim_articles, Article, ArticleSource, FetchedArticle, SlimArticle};
pub use requests::{FeedQuery, LoginRequest, PreferencesUpdate, SearchQuery, SignupRequest};
pub use responses::{
    AuthResponse, CacheDeleteResponse, CacheStatsResponse, ErrorResponse, FeedResponse,
    HealthResponse, MarkFavoriteResponse, MarkReadResponse, PreferencesResponse, SavedResponse,
    SearchResponse,
};
pub use user::{Preferences, User};
