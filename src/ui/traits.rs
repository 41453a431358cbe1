//! Core traits for the UI abstraction layer

use crate::credential::CredentialSources;
use crate::fetch::Fetcher;
use crate::session::SessionOutcome;
use std::sync::Arc;

/// Trait for interactive repository pickers
///
/// A picker owns the terminal (or whatever stands in for it) for the whole
/// session and returns only once the user has chosen or left.
pub trait RepoPicker {
    /// Run a search session to completion
    ///
    /// The credential is resolved from `sources` before the first fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the UI cannot be set up, or if a fetch fails in a
    /// way the session cannot recover from.
    fn pick(
        &self,
        fetcher: Arc<Fetcher>,
        sources: &CredentialSources,
        initial_query: Option<&str>,
    ) -> crate::Result<SessionOutcome>;
}
