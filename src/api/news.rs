//! News handlers: the cached feed, saved articles, search, and per-user
//! read/favorite marks.
//!
//! The feed handler is the cache's request-path consumer. Its lock
//! discipline is deliberate: the cache lock is taken for the lookup,
//! released across the upstream fetch and the storage write, and taken
//! again for the insert. Slow upstream calls therefore never block other
//! requests out of the cache.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::debug;

use crate::api::AppState;
use crate::auth::AuthUser;
use crate::cache::feed_key;
use crate::error::{ApiError, Result};
use crate::models::{
    slim_articles, FeedQuery, FeedResponse, MarkFavoriteResponse, MarkReadResponse, SavedResponse,
    SearchQuery, SearchResponse,
};

/// Most articles the saved endpoint will return.
const SAVED_LIMIT: u32 = 100;

// == Feed ==
/// Handler for GET /news
///
/// Serves the user's preference-driven headline feed. Cache hit answers
/// straight from memory with `fromCache: true`; a miss fetches the
/// primary category/language from the provider, persists the batch,
/// caches the slim projection, and answers `fromCache: false`.
pub async fn feed_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    let country = query
        .country
        .unwrap_or_else(|| state.config.default_country.clone());
    let prefs = &user.preferences;
    let key = feed_key(&prefs.categories, &prefs.languages, &country);

    // Write lock even for the lookup: an expired get removes the entry.
    {
        let mut cache = state.cache.write().await;
        if let Some(articles) = cache.get(&key) {
            debug!("Feed cache hit for {}", key);
            return Ok(Json(FeedResponse::new(true, articles.as_ref().clone())));
        }
    }

    debug!("Feed cache miss for {}", key);

    let category = prefs
        .categories
        .first()
        .map(String::as_str)
        .unwrap_or("general");
    let language = prefs
        .languages
        .first()
        .map(String::as_str)
        .unwrap_or("en");

    let fetched = state
        .provider
        .top_headlines(category, language, &country)
        .await?;

    // Persistence failures are logged inside and never fail the request.
    state.db.upsert_articles(&fetched, category, language, &country);

    let slim = Arc::new(slim_articles(&fetched));
    {
        let mut cache = state.cache.write().await;
        cache.set(key, Arc::clone(&slim));
    }

    Ok(Json(FeedResponse::new(false, slim.as_ref().clone())))
}

// == Saved ==
/// Handler for GET /news/saved
///
/// The latest persisted articles, newest publication first.
pub async fn saved_handler(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<SavedResponse>> {
    let articles = state.db.recent_articles(SAVED_LIMIT)?;
    Ok(Json(SavedResponse::new(articles)))
}

// == Search ==
/// Handler for GET /news/search/:keyword
///
/// Straight pass-through to the provider's search endpoint. Results are
/// persisted for the saved feed but deliberately never cached: the
/// keyword space is user-controlled and would grow the cache without
/// bound.
pub async fn search_handler(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(keyword): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let language = query.language.as_deref().unwrap_or("en");
    let page = query.page.unwrap_or(1);

    let fetched = state.provider.search(&keyword, language, page).await?;

    // Search results carry no category/country tags.
    state.db.upsert_articles(&fetched, "", language, "");

    Ok(Json(SearchResponse::new(slim_articles(&fetched))))
}

// == Mark Read ==
/// Handler for POST /news/:id/read
///
/// Idempotent: marking an already-read article changes nothing. Unknown
/// article ids are a 404.
pub async fn mark_read_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MarkReadResponse>> {
    if !state.db.article_exists(id)? {
        return Err(ApiError::NotFound("Article not found".to_string()));
    }

    state.db.mark_read(user.id, id)?;
    Ok(Json(MarkReadResponse::new(state.db.read_article_ids(user.id)?)))
}

// == Mark Favorite ==
/// Handler for POST /news/:id/favorite
pub async fn mark_favorite_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MarkFavoriteResponse>> {
    if !state.db.article_exists(id)? {
        return Err(ApiError::NotFound("Article not found".to_string()));
    }

    state.db.mark_favorite(user.id, id)?;
    Ok(Json(MarkFavoriteResponse::new(
        state.db.favorite_article_ids(user.id)?,
    )))
}

// == Read List ==
/// Handler for GET /news/read
pub async fn read_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<SavedResponse>> {
    let articles = state.db.read_articles(user.id)?;
    Ok(Json(SavedResponse::new(articles)))
}

// == Favorites List ==
/// Handler for GET /news/favorites
pub async fn favorites_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<SavedResponse>> {
    let articles = state.db.favorite_articles(user.id)?;
    Ok(Json(SavedResponse::new(articles)))
}
