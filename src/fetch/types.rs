//! Request and result types for repository search

use serde::{Deserialize, Serialize};

/// Character prepended to a query to form its cache key
pub const SENTINEL: char = '/';

/// Upper bound on entries in one result set
pub const SEARCH_LIMIT: usize = 20;

/// Page size requested from the search service, and the trending cut-off
pub const PER_PAGE: usize = 8;

/// Maximum label length in characters
pub const MAX_LABEL_CHARS: usize = 24;

/// Maximum rendered description length in characters
pub const MAX_DESCRIPTION_CHARS: usize = 48;

/// Query parameters sent to the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequestParams {
    /// Raw query text
    pub q: String,
    /// Result limit
    pub limit: usize,
    /// Page size
    pub per_page: usize,
}

impl SearchRequestParams {
    /// Parameters for a query, with the fixed limit and page size
    #[must_use]
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            limit: SEARCH_LIMIT,
            per_page: PER_PAGE,
        }
    }
}

/// A selectable search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    /// Canonical reference returned on selection
    pub value: String,
    /// Display name, at most [`MAX_LABEL_CHARS`] characters
    pub label: String,
    /// Free-text description from upstream
    pub description: Option<String>,
    /// Widest label in this entry's batch, for column alignment
    pub max_label_width: usize,
}

impl ResultEntry {
    /// Description as rendered, cut to [`MAX_DESCRIPTION_CHARS`]
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .map_or("", |d| truncate_chars(d, MAX_DESCRIPTION_CHARS))
    }
}

/// Ordered results for one query
pub type ResultSet = Vec<ResultEntry>;

/// Raw HTTP reply from a repository source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// Status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl HttpReply {
    /// Create a reply
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Repository as returned by either endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RepoItem {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Cut `s` to at most `max` characters without splitting one
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(idx, _)| &s[..idx])
}
