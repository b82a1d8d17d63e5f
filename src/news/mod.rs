//! News Provider Module
//!
//! Upstream headline source behind a narrow async trait. The HTTP client
//! lives in `client`; the rest of the crate talks to the trait so tests
//! and the refresh task can substitute stub providers.

mod client;

pub use client::NewsApiClient;

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::models::FetchedArticle;

// == News Provider ==
/// Source of articles for the feed path, the refresh task, and search.
///
/// Implementations own the network work; callers decide what to cache
/// and what to persist.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetches the current top headlines for one category, language and
    /// country combination.
    async fn top_headlines(
        &self,
        category: &str,
        language: &str,
        country: &str,
    ) -> Result<Vec<FetchedArticle>>;

    /// Searches the article corpus for `query`, sorted by relevancy.
    async fn search(
        &self,
        query: &str,
        language: &str,
        page: u32,
    ) -> Result<Vec<FetchedArticle>>;
}

// == Stub Provider ==
/// A canned provider for testing.
///
/// Answers every call with the same pre-configured batch (or a fixed
/// upstream error) and logs the requests it received, so tests can make
/// deterministic assertions about what was fetched.
#[derive(Debug, Default)]
pub struct StubProvider {
    articles: Vec<FetchedArticle>,
    fail_with: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl StubProvider {
    /// A provider that answers every call with `articles`.
    pub fn with_articles(articles: Vec<FetchedArticle>) -> Self {
        Self {
            articles,
            ..Self::default()
        }
    }

    /// A provider whose every call fails with an upstream error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    /// The calls made so far, one `"<endpoint> <args...>"` line each.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn answer(&self) -> Result<Vec<FetchedArticle>> {
        match &self.fail_with {
            Some(message) => Err(ApiError::Upstream(message.clone())),
            None => Ok(self.articles.clone()),
        }
    }
}

#[async_trait]
impl NewsProvider for StubProvider {
    async fn top_headlines(
        &self,
        category: &str,
        language: &str,
        country: &str,
    ) -> Result<Vec<FetchedArticle>> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("top-headlines {} {} {}", category, language, country));
        self.answer()
    }

    async fn search(
        &self,
        query: &str,
        language: &str,
        page: u32,
    ) -> Result<Vec<FetchedArticle>> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("everything {} {} {}", query, language, page));
        self.answer()
    }
}
