//! Configuration Module
//!
//! Handles loading and managing server configuration from environment
//! variables. Loading never fails: unset or unparsable values fall back to
//! the defaults, so a bad `CACHE_TTL_SECONDS` silently becomes 300 seconds
//! rather than aborting startup.

use std::env;

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Cache TTL in seconds, shared by every cache entry
    pub cache_ttl: u64,
    /// Interval in seconds between background refresh cycles
    pub refresh_interval: u64,
    /// Country used when a request or the refresh task gives none
    pub default_country: String,
    /// API key for the upstream news provider
    pub news_api_key: String,
    /// Base URL of the upstream news provider
    pub news_api_base_url: String,
    /// Path of the embedded database file
    pub database_path: String,
    /// Bearer token lifetime in seconds
    pub token_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 4000)
    /// - `CACHE_TTL_SECONDS` - cache TTL (default: 300)
    /// - `CACHE_REFRESH_INTERVAL_SECONDS` - refresh cadence (default: 300)
    /// - `DEFAULT_COUNTRY` - fallback country code (default: "us")
    /// - `NEWS_API_KEY` - upstream API key (default: empty; upstream calls
    ///   will fail retrievably until one is set)
    /// - `NEWS_API_BASE_URL` - upstream base URL (default: newsapi.org/v2)
    /// - `DATABASE_PATH` - embedded database file (default: "newswire.db")
    /// - `TOKEN_TTL_SECONDS` - bearer token lifetime (default: 7 days)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),
            cache_ttl: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            refresh_interval: env::var("CACHE_REFRESH_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            default_country: env::var("DEFAULT_COUNTRY").unwrap_or_else(|_| "us".to_string()),
            news_api_key: env::var("NEWS_API_KEY").unwrap_or_default(),
            news_api_base_url: env::var("NEWS_API_BASE_URL")
                .unwrap_or_else(|_| "https://newsapi.org/v2".to_string()),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "newswire.db".to_string()),
            token_ttl: env::var("TOKEN_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7 * 24 * 60 * 60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 4000,
            cache_ttl: 300,
            refresh_interval: 300,
            default_country: "us".to_string(),
            news_api_key: String::new(),
            news_api_base_url: "https://newsapi.org/v2".to_string(),
            database_path: "newswire.db".to_string(),
            token_ttl: 7 * 24 * 60 * 60,
        }
    }
}
