//! Listing and detail pipelines.
//!
//! Both pipelines operate on a shared [`NewsContext`] that owns the runtime
//! configuration and the article cache, and are generic over the discovery
//! and extraction collaborators so tests can substitute fakes.

pub mod detail;
pub mod listing;

use crate::cache::ArticleCache;
use crate::config::AppConfig;

/// Shared state passed into both pipelines.
///
/// The cache is owned here rather than living as ambient global state;
/// every read-check-then-write sequence goes through this one handle.
#[derive(Debug)]
pub struct NewsContext {
    /// Runtime configuration (caps, heuristics, denylist).
    pub config: AppConfig,
    /// Process-wide article cache, populated by the listing pipeline.
    pub cache: ArticleCache,
}

impl NewsContext {
    /// Build a context from configuration, honoring the optional cache
    /// entry limit.
    pub fn new(config: AppConfig) -> Self {
        let cache = match config.cache_entry_limit {
            Some(limit) => ArticleCache::bounded(limit),
            None => ArticleCache::new(),
        };
        Self { config, cache }
    }
}
