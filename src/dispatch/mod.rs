//! Query cache and fetch dispatch
//!
//! Every query maps to a cache key (`/` + trimmed query). The cache
//! remembers each key's state so that a key is fetched at most once at a
//! time, and keeps the last non-empty result set for the live query on
//! screen while a newer query is still loading.
//!
//! Replies can arrive in any order. A reply for a key the user has moved
//! away from is cached for reuse but never displayed.

mod worker;

pub use worker::{FetchReply, FetchWorker};

use crate::fetch::{ResultEntry, ResultSet, SENTINEL};
use std::collections::HashMap;

/// Cache key for a query
#[must_use]
pub fn cache_key(query: &str) -> String {
    format!("{SENTINEL}{}", query.trim())
}

/// State of one cache key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    /// A request is in flight
    Pending,
    /// Results arrived
    Resolved(ResultSet),
    /// The request failed; shown as an empty set
    Failed,
}

/// What the caller must do after [`QueryCache::dispatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Start a fetch for this key
    Fetch(String),
    /// Nothing to do; the key is pending or cached
    Cached,
}

/// Per-key result cache with stale-while-revalidate display
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<String, CacheEntry>,
    current: Option<String>,
    last_good: ResultSet,
}

impl QueryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `key` the live key and decide whether it needs fetching
    ///
    /// Failed keys are retried; pending and resolved keys are not.
    pub fn dispatch(&mut self, key: &str) -> Dispatch {
        self.current = Some(key.to_string());

        match self.entries.get(key) {
            Some(CacheEntry::Resolved(results)) => {
                tracing::debug!(key, "cache hit");
                // Back on screen, so it is what a newer pending key falls back to
                if !results.is_empty() {
                    self.last_good.clone_from(results);
                }
                Dispatch::Cached
            }
            Some(CacheEntry::Pending) => {
                tracing::debug!(key, "fetch already in flight");
                Dispatch::Cached
            }
            Some(CacheEntry::Failed) | None => {
                self.entries.insert(key.to_string(), CacheEntry::Pending);
                Dispatch::Fetch(key.to_string())
            }
        }
    }

    /// Store results for a key
    pub fn resolve(&mut self, key: &str, results: ResultSet) {
        if self.is_current(key) && !results.is_empty() {
            self.last_good.clone_from(&results);
        } else if !self.is_current(key) {
            tracing::debug!(key, "late reply for abandoned key cached");
        }
        self.entries
            .insert(key.to_string(), CacheEntry::Resolved(results));
    }

    /// Mark a key as failed
    pub fn fail(&mut self, key: &str) {
        self.entries.insert(key.to_string(), CacheEntry::Failed);
    }

    /// Results to render for the live key
    #[must_use]
    pub fn visible(&self) -> &[ResultEntry] {
        match self.current_entry() {
            Some(CacheEntry::Resolved(results)) => results,
            Some(CacheEntry::Failed) => &[],
            Some(CacheEntry::Pending) | None => &self.last_good,
        }
    }

    /// Whether the live key is still loading
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.current_entry(), Some(CacheEntry::Pending))
    }

    /// State of a key
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    fn current_entry(&self) -> Option<&CacheEntry> {
        self.current.as_ref().and_then(|key| self.entries.get(key))
    }

    fn is_current(&self, key: &str) -> bool {
        self.current.as_deref() == Some(key)
    }
}
