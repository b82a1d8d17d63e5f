//! Feed Refresh Task
//!
//! Background task that periodically re-fetches the default feeds and
//! rewrites their cache entries, so common feeds stay warm without waiting
//! for a request-path miss.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{feed_key, FeedCache};
use crate::models::slim_articles;
use crate::news::NewsProvider;

/// Categories refreshed every cycle, independent of user preferences.
const REFRESH_CATEGORIES: [&str; 4] = ["general", "business", "technology", "sports"];

/// Language the refresh task fetches in.
const REFRESH_LANGUAGE: &str = "en";

/// Spawns a background task that periodically refreshes the default feeds.
///
/// The first cycle runs immediately at startup so the cache is warm before
/// the first request; later cycles run every `refresh_interval_secs`. Each
/// cycle fetches one feed per category in `REFRESH_CATEGORIES` and rewrites
/// that feed's cache entry, which also resets its expiry clock.
///
/// A failed fetch is logged and skipped: the cycle moves on to the next
/// category and the previous cache entry for the failed feed is left alone.
/// Under a provider outage clients keep being served the last good feed
/// until its TTL runs out.
///
/// # Arguments
/// * `cache` - Shared feed cache, also used by the request path
/// * `provider` - Upstream news source
/// * `refresh_interval_secs` - Seconds between refresh cycles
/// * `default_country` - Country the default feeds are fetched for
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_refresh_task(cache.clone(), provider.clone(), 300, "us".to_string());
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_refresh_task(
    cache: Arc<RwLock<FeedCache>>,
    provider: Arc<dyn NewsProvider>,
    refresh_interval_secs: u64,
    default_country: String,
) -> JoinHandle<()> {
    // interval() panics on a zero period.
    let period = Duration::from_secs(refresh_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting feed refresh task with interval of {} seconds",
            refresh_interval_secs
        );

        let mut ticker = tokio::time::interval(period);

        loop {
            // First tick completes immediately.
            ticker.tick().await;
            refresh_cycle(&cache, provider.as_ref(), &default_country).await;
        }
    })
}

/// Runs one refresh cycle over all default categories.
async fn refresh_cycle(cache: &RwLock<FeedCache>, provider: &dyn NewsProvider, country: &str) {
    for category in REFRESH_CATEGORIES {
        match provider
            .top_headlines(category, REFRESH_LANGUAGE, country)
            .await
        {
            Ok(fetched) => {
                let slim = Arc::new(slim_articles(&fetched));
                let count = slim.len();
                let key = feed_key(
                    &[category.to_string()],
                    &[REFRESH_LANGUAGE.to_string()],
                    country,
                );

                cache.write().await.set(key, slim);
                debug!("Refreshed {} feed ({} articles)", category, count);
            }
            Err(e) => {
                warn!("Refresh for {} feed failed: {}", category, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleSource, FetchedArticle};
    use crate::news::StubProvider;

    fn stub_article() -> FetchedArticle {
        FetchedArticle {
            source: ArticleSource {
                id: None,
                name: "Wire".to_string(),
            },
            title: Some("Headline".to_string()),
            url: Some("https://example.com/a".to_string()),
            ..FetchedArticle::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_populates_all_default_feeds() {
        let cache = Arc::new(RwLock::new(FeedCache::default()));
        let provider = Arc::new(StubProvider::with_articles(vec![stub_article()]));

        // Long interval: only the immediate first cycle runs.
        let handle = spawn_refresh_task(
            cache.clone(),
            provider.clone(),
            3600,
            "us".to_string(),
        );

        tokio::time::sleep(Duration::from_millis(200)).await;

        {
            let mut guard = cache.write().await;
            for category in REFRESH_CATEGORIES {
                let key = feed_key(
                    &[category.to_string()],
                    &["en".to_string()],
                    "us",
                );
                let entry = guard.get(&key);
                assert!(entry.is_some(), "missing refreshed feed for {}", category);
                assert_eq!(entry.unwrap().len(), 1);
            }
        }
        assert_eq!(provider.request_count(), 4);

        handle.abort();
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_existing_entries() {
        let cache = Arc::new(RwLock::new(FeedCache::default()));
        {
            let mut guard = cache.write().await;
            guard.set("general|en|us", Arc::new(vec![]));
        }
        let provider = Arc::new(StubProvider::failing("provider outage"));

        let handle = spawn_refresh_task(
            cache.clone(),
            provider.clone(),
            3600,
            "us".to_string(),
        );

        tokio::time::sleep(Duration::from_millis(200)).await;

        // Every category was attempted; the one pre-existing entry survives.
        assert_eq!(provider.request_count(), 4);
        {
            let mut guard = cache.write().await;
            assert!(guard.get("general|en|us").is_some());
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_refresh_cycles_repeat() {
        let cache = Arc::new(RwLock::new(FeedCache::default()));
        let provider = Arc::new(StubProvider::with_articles(vec![stub_article()]));

        let handle = spawn_refresh_task(cache, provider.clone(), 1, "us".to_string());

        // Immediate cycle plus at least one timed cycle.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(
            provider.request_count() >= 8,
            "expected two cycles, saw {} requests",
            provider.request_count()
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_refresh_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(FeedCache::default()));
        let provider = Arc::new(StubProvider::default());

        let handle = spawn_refresh_task(cache, provider, 1, "us".to_string());

        // Abort immediately
        handle.abort();

        // Wait a bit and verify task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
