//! Transport abstraction for repository lookups

use super::error::FetchError;
use super::types::{HttpReply, SearchRequestParams};

/// A source of repository listings
///
/// Implementations perform the HTTP exchange only; status handling and
/// payload normalization live in [`super::Fetcher`]. Calls block and are
/// made from background worker threads.
pub trait RepoSource: Send + Sync {
    /// Fetch the default trending listing
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the request cannot be completed.
    fn trending(&self) -> Result<HttpReply, FetchError>;

    /// Run a repository search
    ///
    /// # Arguments
    ///
    /// * `params` - Query parameters to encode into the URL
    /// * `token` - Bearer token, when a credential has been applied
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the request cannot be completed.
    fn search(
        &self,
        params: &SearchRequestParams,
        token: Option<&str>,
    ) -> Result<HttpReply, FetchError>;
}

impl<T: RepoSource + ?Sized> RepoSource for std::sync::Arc<T> {
    fn trending(&self) -> Result<HttpReply, FetchError> {
        (**self).trending()
    }

    fn search(
        &self,
        params: &SearchRequestParams,
        token: Option<&str>,
    ) -> Result<HttpReply, FetchError> {
        (**self).search(params, token)
    }
}
