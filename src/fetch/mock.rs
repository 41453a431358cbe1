//! Mock repository source for testing

use super::error::FetchError;
use super::traits::RepoSource;
use super::types::{HttpReply, SearchRequestParams};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Repository source returning canned replies
///
/// Useful for testing without network access. Every request is recorded
/// so tests can assert on what was sent.
#[derive(Debug, Default)]
pub struct MockSource {
    /// Reply for the trending endpoint
    pub trending: Option<HttpReply>,
    /// Replies keyed by query text
    pub searches: HashMap<String, HttpReply>,
    /// Artificial latency per query text
    pub delays: HashMap<String, Duration>,
    /// Requests seen so far: (query, token)
    pub requests: Mutex<Vec<(String, Option<String>)>>,
}

impl MockSource {
    /// Create an empty mock source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trending reply
    #[must_use]
    pub fn with_trending(mut self, status: u16, body: &str) -> Self {
        self.trending = Some(HttpReply::new(status, body));
        self
    }

    /// Set the reply for a query
    #[must_use]
    pub fn with_search(mut self, query: &str, status: u16, body: &str) -> Self {
        self.searches
            .insert(query.to_string(), HttpReply::new(status, body));
        self
    }

    /// Delay the reply for a query
    #[must_use]
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    /// Requests recorded so far
    #[must_use]
    pub fn recorded(&self) -> Vec<(String, Option<String>)> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn record(&self, query: &str, token: Option<&str>) {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((query.to_string(), token.map(ToOwned::to_owned)));

        if let Some(delay) = self.delays.get(query) {
            std::thread::sleep(*delay);
        }
    }
}

impl RepoSource for MockSource {
    fn trending(&self) -> Result<HttpReply, FetchError> {
        self.record("", None);
        self.trending
            .clone()
            .ok_or_else(|| FetchError::transport(std::io::Error::other("no trending reply")))
    }

    fn search(
        &self,
        params: &SearchRequestParams,
        token: Option<&str>,
    ) -> Result<HttpReply, FetchError> {
        self.record(&params.q, token);
        self.searches.get(&params.q).cloned().ok_or_else(|| {
            FetchError::transport(std::io::Error::other(format!("no reply for {}", params.q)))
        })
    }
}

/// Search body with the given repositories as `(full_name, description, branch)`
#[must_use]
pub fn search_body(total_count: usize, repos: &[(&str, &str, &str)]) -> String {
    serde_json::json!({
        "total_count": total_count,
        "items": items_json(repos),
    })
    .to_string()
}

/// Trending body with the given repositories
#[must_use]
pub fn trending_body(repos: &[(&str, &str, &str)]) -> String {
    serde_json::json!({ "items": items_json(repos) }).to_string()
}

fn items_json(repos: &[(&str, &str, &str)]) -> Vec<serde_json::Value> {
    repos
        .iter()
        .map(|(name, description, branch)| {
            serde_json::json!({
                "full_name": name,
                "description": description,
                "default_branch": branch,
            })
        })
        .collect()
}
