//! Feed Cache Key Module
//!
//! Builds the composite key under which a feed is cached.

// == Feed Key ==
/// Builds the cache key for a feed request:
/// `<categories-joined-by-comma>|<languages-joined-by-comma>|<country>`.
///
/// The format is load-bearing: the periodic refresh task and the request
/// path must produce identical keys for identical inputs. Lists are joined
/// in the order given, with no deduplication and no normalization.
pub fn feed_key(categories: &[String], languages: &[String], country: &str) -> String {
    format!(
        "{}|{}|{}",
        categories.join(","),
        languages.join(","),
        country
    )
}
