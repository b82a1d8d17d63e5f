//! Article Models
//!
//! The three shapes an article takes on its way through the system: the
//! upstream wire record, the persisted record, and the slim projection
//! stored in the cache and returned to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Article Source ==
/// The publication an article came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    /// Upstream source identifier, often absent
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable source name
    #[serde(default = "default_source_name")]
    pub name: String,
}

fn default_source_name() -> String {
    "Unknown".to_string()
}

impl Default for ArticleSource {
    fn default() -> Self {
        Self {
            id: None,
            name: default_source_name(),
        }
    }
}

// == Fetched Article ==
/// An article exactly as the upstream provider returns it.
///
/// Every field except the source can be null or missing on the wire, so
/// everything is optional here; required-field policy is applied when a
/// record is persisted, not when it is parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedArticle {
    #[serde(default)]
    pub source: ArticleSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: Option<String>,
}

// == Slim Article ==
/// Display-relevant projection of an article.
///
/// This is what the cache stores and what feed/search responses carry; the
/// reduced field set bounds the size of a cache entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlimArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: ArticleSource,
}

impl From<&FetchedArticle> for SlimArticle {
    fn from(article: &FetchedArticle) -> Self {
        Self {
            title: article.title.clone(),
            description: article.description.clone(),
            url: article.url.clone(),
            url_to_image: article.url_to_image.clone(),
            published_at: article.published_at,
            source: article.source.clone(),
        }
    }
}

/// Slims a batch of fetched articles.
pub fn slim_articles(articles: &[FetchedArticle]) -> Vec<SlimArticle> {
    articles.iter().map(SlimArticle::from).collect()
}

// == Persisted Article ==
/// An article as stored in the database.
///
/// Unlike the wire shape, title and url are required here; rows that lack
/// them are skipped at upsert time. The category/language/country tags
/// record the query the article was fetched for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub source: ArticleSource,
    pub author: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub url_to_image: String,
    pub published_at: Option<DateTime<Utc>>,
    pub content: String,
    pub category: String,
    pub language: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
