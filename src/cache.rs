//! Process-wide article cache.
//!
//! Extracted content is cached by page reference so a detail view never
//! repeats work the listing view already performed. The cache lives inside
//! the pipeline context and is dropped with the process; nothing is
//! persisted.
//!
//! Inserts are idempotent: once a reference is cached, the cached value is
//! authoritative and later inserts for the same reference are ignored. The
//! listing pipeline is the canonical writer.

use crate::models::{ExtractedContent, PageReference};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Thread-safe map of page reference to extracted content.
///
/// All access goes through [`get`](Self::get) and [`put`](Self::put) so the
/// lock scope covers every read-check-then-write sequence under concurrent
/// callers.
///
/// The optional entry limit is an extension point for an eviction policy;
/// by default the cache is unbounded and grows for the lifetime of the
/// process.
#[derive(Debug, Default)]
pub struct ArticleCache {
    entries: Mutex<HashMap<PageReference, ExtractedContent>>,
    entry_limit: Option<usize>,
}

impl ArticleCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that stops accepting entries once `limit` is reached.
    pub fn bounded(limit: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            entry_limit: Some(limit),
        }
    }

    /// Look up the cached content for a reference.
    pub fn get(&self, reference: &PageReference) -> Option<ExtractedContent> {
        self.entries
            .lock()
            .expect("article cache lock poisoned")
            .get(reference)
            .cloned()
    }

    /// Insert content for its reference if not already present.
    ///
    /// Returns `true` when the entry was stored. An existing entry is never
    /// overwritten, and a full bounded cache rejects new entries.
    pub fn put(&self, content: ExtractedContent) -> bool {
        let mut entries = self.entries.lock().expect("article cache lock poisoned");
        if entries.contains_key(&content.reference) {
            return false;
        }
        if let Some(limit) = self.entry_limit {
            if entries.len() >= limit {
                debug!(limit, reference = %content.reference, "Cache full; not storing entry");
                return false;
            }
        }
        entries.insert(content.reference.clone(), content);
        true
    }

    /// Whether a reference is cached.
    pub fn contains(&self, reference: &PageReference) -> bool {
        self.entries
            .lock()
            .expect("article cache lock poisoned")
            .contains_key(reference)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("article cache lock poisoned")
            .len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
