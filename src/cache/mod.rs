//! Cache Module
//!
//! In-memory TTL caching with lazy, expire-on-read expiration.
//!
//! The cache contract is deliberately narrow: get/set/del/keys/clear over
//! opaque string keys, with one TTL for every entry. A shared external
//! cache could replace it without touching the callers.

mod entry;
mod key;
mod stats;
mod store;


use std::sync::Arc;

use crate::models::SlimArticle;

// Re-export public types
pub use entry::CacheEntry;
pub use key::feed_key;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// TTL used when no valid `CACHE_TTL_SECONDS` is configured.
pub const DEFAULT_TTL_SECONDS: u64 = 300;

// == Feed Cache ==
/// The cache instance used by the feed path and the refresh task.
///
/// Values are `Arc`-shared slim article lists: a cache hit hands out
/// another reference to the same read-only payload rather than a copy.
pub type FeedCache = TtlCache<Arc<Vec<SlimArticle>>>;
