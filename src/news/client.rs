//! News API Client
//!
//! reqwest-backed [`NewsProvider`] implementation speaking the NewsAPI
//! wire protocol: an envelope with a `status` field wrapping either an
//! article list or an error code and message.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::FetchedArticle;
use crate::news::NewsProvider;

// == Constants ==
/// Timeout applied to every upstream request.
const REQUEST_TIMEOUT_SECS: u64 = 10;

// == Wire Envelope ==
/// Response shape shared by every upstream endpoint.
///
/// On success `status` is `"ok"` and `articles` is populated; on failure
/// `status` is `"error"` and `code`/`message` describe the problem. The
/// upstream sends error envelopes with non-2xx HTTP statuses, so the body
/// is parsed before the status line is considered.
#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    articles: Vec<FetchedArticle>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// == News API Client ==
/// Live news provider backed by the configured upstream API.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    // == Constructor ==
    /// Creates a client from the configured base URL and API key.
    ///
    /// # Arguments
    /// * `config` - Source of `news_api_base_url` and `news_api_key`
    ///
    /// # Returns
    /// * `Result<Self>` - The client, or an error if the underlying HTTP
    ///   client could not be built
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.news_api_base_url.trim_end_matches('/').to_string(),
            api_key: config.news_api_key.clone(),
        })
    }

    // == Fetch ==
    /// Issues one GET against `path` and unwraps the upstream envelope.
    ///
    /// A non-"ok" envelope becomes `ApiError::Upstream` carrying the
    /// upstream's own message; transport and decode failures become
    /// `ApiError::Http`.
    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<FetchedArticle>> {
        let url = format!("{}/{}", self.base_url, path);

        let response: NewsApiResponse = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(params)
            .send()
            .await?
            .json()
            .await?;

        if response.status != "ok" {
            let reason = response
                .message
                .or(response.code)
                .unwrap_or_else(|| "News API error".to_string());
            return Err(ApiError::Upstream(reason));
        }

        debug!("Fetched {} articles from /{}", response.articles.len(), path);
        Ok(response.articles)
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn top_headlines(
        &self,
        category: &str,
        language: &str,
        country: &str,
    ) -> Result<Vec<FetchedArticle>> {
        let params = [
            ("category", category.to_string()),
            ("language", language.to_string()),
            ("country", country.to_string()),
        ];
        self.fetch("top-headlines", &params).await
    }

    async fn search(
        &self,
        query: &str,
        language: &str,
        page: u32,
    ) -> Result<Vec<FetchedArticle>> {
        let params = [
            ("q", query.to_string()),
            ("language", language.to_string()),
            ("sortBy", "relevancy".to_string()),
            ("page", page.to_string()),
        ];
        self.fetch("everything", &params).await
    }
}
