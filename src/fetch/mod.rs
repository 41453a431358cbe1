//! Repository fetching and result normalization
//!
//! Turns a cache key into a bounded, ranked [`ResultSet`]:
//!
//! - an empty query reads the trending listing, cut to [`PER_PAGE`] items
//! - anything else runs a repository search with [`SearchRequestParams`]
//!
//! Non-2xx replies are reported to the output sink and produce an empty
//! set. A search reply whose `total_count` is not a number is treated as a
//! broken upstream contract and returned as [`FetchError::MalformedPayload`].

mod error;
mod github;
mod traits;
mod types;

#[cfg(test)]
pub mod mock;

pub use error::FetchError;
pub use github::{GITHUB_ACCEPT, GithubSource};
pub use traits::RepoSource;
pub use types::{
    HttpReply, MAX_DESCRIPTION_CHARS, MAX_LABEL_CHARS, PER_PAGE, ResultEntry, ResultSet,
    SEARCH_LIMIT, SENTINEL, SearchRequestParams, truncate_chars,
};

use crate::config::SearchConfig;
use crate::credential::{CredentialCell, CredentialSources};
use crate::ui::OutputWriter;
use serde::Deserialize as _;
use serde_json::Value;
use std::sync::Arc;
use types::RepoItem;

/// A decoded listing before normalization
#[derive(Debug, Default)]
struct Listing {
    total_count: f64,
    items: Vec<RepoItem>,
}

/// Fetches and normalizes repository listings
pub struct Fetcher {
    source: Box<dyn RepoSource>,
    credential: Arc<CredentialCell>,
    web_base_url: String,
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("web_base_url", &self.web_base_url)
            .field("authenticated", &self.credential.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Fetcher {
    /// Create a fetcher over any repository source
    #[must_use]
    pub fn new(
        source: impl RepoSource + 'static,
        credential: Arc<CredentialCell>,
        web_base_url: impl Into<String>,
    ) -> Self {
        Self {
            source: Box::new(source),
            credential,
            web_base_url: web_base_url.into(),
        }
    }

    /// Create a GitHub-backed fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be built.
    pub fn from_config(
        config: &SearchConfig,
        credential: Arc<CredentialCell>,
    ) -> Result<Self, FetchError> {
        let source = GithubSource::from_config(config)?;
        Ok(Self::new(source, credential, config.web_base_url.clone()))
    }

    /// Resolve the credential used for searches
    ///
    /// Only the first call performs a lookup; later calls keep that answer.
    pub fn apply_credential(&self, sources: &CredentialSources) -> bool {
        let authenticated = self.credential.resolve(sources).is_some();
        tracing::debug!(authenticated, "credential applied");
        authenticated
    }

    /// Fetch the results for a cache key
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the request fails, the body is not JSON, or
    /// the search payload is malformed.
    pub fn fetch(&self, key: &str, sink: &dyn OutputWriter) -> Result<ResultSet, FetchError> {
        let query = strip_sentinel(key);
        let trending = query.trim().is_empty();

        let reply = if trending {
            self.source.trending()?
        } else {
            let params = SearchRequestParams::new(query);
            self.source.search(&params, self.credential.get())?
        };

        if !reply.is_success() {
            tracing::warn!(status = reply.status, query, "search request failed");
            sink.error(&format!(
                "GitHub search API request failed with status:{}",
                reply.status
            ));
            return Ok(ResultSet::new());
        }

        let listing = if trending {
            parse_trending(&reply.body)?
        } else {
            parse_search(&reply.body)?
        };

        let entries = build_entries(listing, &self.web_base_url);
        tracing::debug!(query, count = entries.len(), "results normalized");
        Ok(entries)
    }
}

/// Recover the raw query from a cache key
#[must_use]
pub fn strip_sentinel(key: &str) -> &str {
    let mut chars = key.chars();
    chars.next();
    chars.as_str()
}

/// Canonical reference for a repository on a given branch
#[must_use]
pub fn canonical_reference(web_base_url: &str, full_name: &str, branch: Option<&str>) -> String {
    let base = web_base_url.trim_end_matches('/');
    match branch {
        Some(branch) => format!("{base}/{full_name}.git#{branch}"),
        None => format!("{base}/{full_name}.git"),
    }
}

fn parse_trending(body: &str) -> Result<Listing, FetchError> {
    let payload: Value = serde_json::from_str(body)?;
    let mut items = repo_items(&payload);
    #[allow(clippy::cast_precision_loss)]
    let total_count = items.len() as f64;
    items.truncate(PER_PAGE);
    Ok(Listing { total_count, items })
}

fn parse_search(body: &str) -> Result<Listing, FetchError> {
    let payload: Value = serde_json::from_str(body)?;
    let total = payload.get("total_count");
    let total_count = total
        .and_then(Value::as_f64)
        .filter(|count| count.is_finite())
        .ok_or_else(|| FetchError::MalformedPayload {
            found: total.map_or_else(|| "missing".to_string(), Value::to_string),
        })?;

    Ok(Listing {
        total_count,
        items: repo_items(&payload),
    })
}

fn repo_items(payload: &Value) -> Vec<RepoItem> {
    payload
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match RepoItem::deserialize(item) {
                    Ok(repo) if !repo.full_name.is_empty() => Some(repo),
                    Ok(_) => {
                        tracing::debug!("skipping item without full_name");
                        None
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "skipping malformed item");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Bound, label and align a listing
fn build_entries(listing: Listing, web_base_url: &str) -> ResultSet {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let reported = listing.total_count.max(0.0).floor() as usize;
    let count = reported.min(SEARCH_LIMIT).min(listing.items.len());

    let mut entries: ResultSet = listing
        .items
        .into_iter()
        .take(count)
        .map(|item| ResultEntry {
            value: canonical_reference(
                web_base_url,
                &item.full_name,
                item.default_branch.as_deref(),
            ),
            label: truncate_chars(&item.full_name, MAX_LABEL_CHARS).to_string(),
            description: item.description,
            max_label_width: 0,
        })
        .collect();

    let max_label_width = entries
        .iter()
        .map(|entry| entry.label.chars().count())
        .max()
        .unwrap_or(0);
    for entry in &mut entries {
        entry.max_label_width = max_label_width;
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::mock::{MockSource, search_body, trending_body};
    use super::*;
    use crate::ui::StatusBarWriter;

    fn fetcher(source: MockSource) -> Fetcher {
        Fetcher::new(source, Arc::new(CredentialCell::new()), "https://github.com")
    }

    #[test]
    fn test_search_example() {
        let body = search_body(
            2,
            &[("a/rust-lang", "desc1", "main"), ("b/rustc", "desc2", "master")],
        );
        let sink = StatusBarWriter::new();
        let results = fetcher(MockSource::new().with_search("rust", 200, &body))
            .fetch("/rust", &sink)
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].value, "https://github.com/a/rust-lang.git#main");
        assert_eq!(results[0].label, "a/rust-lang");
        assert_eq!(results[0].description.as_deref(), Some("desc1"));
        assert_eq!(results[1].value, "https://github.com/b/rustc.git#master");
        let width = "a/rust-lang".len().max("b/rustc".len());
        assert!(results.iter().all(|r| r.max_label_width == width));
        assert_eq!(sink.message_count(), 0);
    }

    #[test]
    fn test_result_count_is_bounded() {
        let repos: Vec<(String, String, String)> = (0..30)
            .map(|i| (format!("owner/repo{i}"), format!("d{i}"), "main".to_string()))
            .collect();
        let refs: Vec<(&str, &str, &str)> = repos
            .iter()
            .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
            .collect();

        let sink = StatusBarWriter::new();
        let many = fetcher(MockSource::new().with_search("big", 200, &search_body(5000, &refs)));
        assert_eq!(many.fetch("/big", &sink).unwrap().len(), SEARCH_LIMIT);

        let few = fetcher(MockSource::new().with_search("few", 200, &search_body(3, &refs)));
        assert_eq!(few.fetch("/few", &sink).unwrap().len(), 3);

        let body = search_body(100, &refs[..4]);
        let short = fetcher(MockSource::new().with_search("short", 200, &body));
        assert_eq!(short.fetch("/short", &sink).unwrap().len(), 4);
    }

    #[test]
    fn test_unusable_items_are_skipped() {
        let body = r#"{"total_count": 4, "items": [
            {"full_name": null, "default_branch": "main"},
            {"full_name": "a/kept", "description": "ok", "default_branch": "main"},
            {"description": "no name"},
            42
        ]}"#;
        let sink = StatusBarWriter::new();
        let results = fetcher(MockSource::new().with_search("odd", 200, body))
            .fetch("/odd", &sink)
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].value, "https://github.com/a/kept.git#main");
        assert!(results.iter().all(|r| !r.value.contains("github.com/.git")));

        let trending = r#"{"items": [{"full_name": ""}, {"full_name": "hot/one"}]}"#;
        let results = fetcher(MockSource::new().with_trending(200, trending))
            .fetch("/", &sink)
            .unwrap();
        let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["hot/one"]);
    }

    #[test]
    fn test_labels_are_truncated_and_aligned() {
        let long = "an-organization/with-a-very-long-repository-name";
        let body = search_body(2, &[(long, "", "main"), ("x/y", "", "main")]);
        let sink = StatusBarWriter::new();
        let results = fetcher(MockSource::new().with_search("long", 200, &body))
            .fetch("/long", &sink)
            .unwrap();

        assert_eq!(results[0].label.chars().count(), MAX_LABEL_CHARS);
        assert_eq!(results[0].label, &long[..MAX_LABEL_CHARS]);
        assert!(results.iter().all(|r| r.max_label_width == MAX_LABEL_CHARS));
        assert_eq!(results[0].value, format!("https://github.com/{long}.git#main"));
    }

    #[test]
    fn test_empty_query_uses_trending() {
        let repos: Vec<(String, String, String)> = (0..12)
            .map(|i| (format!("hot/repo{i}"), String::new(), "main".to_string()))
            .collect();
        let refs: Vec<(&str, &str, &str)> = repos
            .iter()
            .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
            .collect();
        let source = MockSource::new().with_trending(200, &trending_body(&refs));
        let fetcher = fetcher(source);
        let sink = StatusBarWriter::new();

        let results = fetcher.fetch("/", &sink).unwrap();
        assert_eq!(results.len(), PER_PAGE);
        assert_eq!(results[0].label, "hot/repo0");
        assert_eq!(results[7].label, "hot/repo7");

        // Whitespace-only queries are empty too
        assert_eq!(fetcher.fetch("/   ", &sink).unwrap().len(), PER_PAGE);
    }

    #[test]
    fn test_trending_without_items() {
        let sink = StatusBarWriter::new();
        let empty = fetcher(MockSource::new().with_trending(200, "{}"));
        assert!(empty.fetch("/", &sink).unwrap().is_empty());

        let null = fetcher(MockSource::new().with_trending(200, r#"{"items": null}"#));
        assert!(null.fetch("/", &sink).unwrap().is_empty());
    }

    #[test]
    fn test_non_success_reports_status() {
        let sink = StatusBarWriter::new();
        let results = fetcher(MockSource::new().with_search("limited", 403, "{}"))
            .fetch("/limited", &sink)
            .unwrap();

        assert!(results.is_empty());
        let (_, message) = sink.latest_message().unwrap();
        assert!(message.contains("403"));
    }

    #[test]
    fn test_malformed_total_count_is_fatal() {
        let sink = StatusBarWriter::new();
        for body in [
            r#"{"items": []}"#,
            r#"{"total_count": null, "items": []}"#,
            r#"{"total_count": "12", "items": []}"#,
        ] {
            let err = fetcher(MockSource::new().with_search("bad", 200, body))
                .fetch("/bad", &sink)
                .unwrap_err();
            assert!(err.is_fatal(), "expected fatal error for {body}");
        }
    }

    #[test]
    fn test_non_json_body_is_recoverable() {
        let sink = StatusBarWriter::new();
        let err = fetcher(MockSource::new().with_search("html", 200, "<html>"))
            .fetch("/html", &sink)
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_token_sent_only_after_apply() {
        let body = search_body(0, &[]);
        let dir = tempfile::tempdir().unwrap();
        let hub = dir.path().join("hub");
        std::fs::write(&hub, "github.com:\n- oauth_token: secret\n").unwrap();
        let sources = CredentialSources {
            env_var: String::new(),
            hub_path: Some(hub),
            hostname: "github.com".to_string(),
        };

        let source = Arc::new(MockSource::new().with_search("q", 200, &body));
        let fetcher = Fetcher::new(
            Arc::clone(&source),
            Arc::new(CredentialCell::new()),
            "https://github.com",
        );
        let sink = StatusBarWriter::new();

        fetcher.fetch("/q", &sink).unwrap();
        assert!(fetcher.apply_credential(&sources));
        fetcher.fetch("/q", &sink).unwrap();

        let recorded = source.recorded();
        assert_eq!(recorded[0], ("q".to_string(), None));
        assert_eq!(recorded[1], ("q".to_string(), Some("secret".to_string())));
    }

    #[test]
    fn test_canonical_reference() {
        assert_eq!(
            canonical_reference("https://github.com/", "a/b", Some("dev")),
            "https://github.com/a/b.git#dev"
        );
        assert_eq!(
            canonical_reference("https://github.com", "a/b", None),
            "https://github.com/a/b.git"
        );
    }

    #[test]
    fn test_strip_sentinel() {
        assert_eq!(strip_sentinel("/rust"), "rust");
        assert_eq!(strip_sentinel("/"), "");
        assert_eq!(strip_sentinel(""), "");
    }
}
