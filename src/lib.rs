//! Reposearch - an interactive repository picker for the terminal
//!
//! This library provides an incremental search-and-select session over the
//! GitHub repository search API. The user types a query, results are fetched
//! in the background and cached per query, and the session resolves to the
//! canonical reference (`https://github.com/<owner>/<repo>.git#<branch>`) of
//! the chosen repository.
//!
//! An empty query shows a default list of trending repositories instead.
//!
//! # Embedding
//!
//! ```no_run
//! use reposearch::{SearchConfig, run_interactive_search};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SearchConfig::load()?;
//! let reference = run_interactive_search(Some("ratatui"), &config)?;
//! println!("{reference}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use thiserror::Error;

pub mod cli;
pub mod config;
pub mod credential;
pub mod dispatch;
pub mod fetch;
pub mod logging;
pub mod session;
pub mod ui;

pub use config::SearchConfig;
pub use credential::{CredentialCell, CredentialSources};
pub use fetch::{FetchError, Fetcher, ResultEntry, ResultSet};
pub use session::{Session, SessionOutcome, SessionPhase};

use ui::{RatatuiPicker, RepoPicker};

/// Exit status used when the user leaves the picker without choosing
pub const ABORT_EXIT_CODE: i32 = 130;

/// Exit status used when the search service sends a payload we cannot use
pub const FATAL_EXIT_CODE: i32 = 1;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SearchError {
    /// Fetching results failed in a way the session cannot recover from
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    /// Terminal setup or rendering failed
    #[error("UI error: {0}")]
    Ui(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Whether this error means the upstream contract was violated
    #[must_use]
    pub const fn is_fatal_payload(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::MalformedPayload { .. }))
    }
}

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, SearchError>;

/// Run an interactive search session and return the chosen reference
///
/// Blocks the caller until the user picks a repository. The terminal is
/// always restored before this function returns or exits.
///
/// If the user leaves without picking anything, or the search service
/// returns a malformed payload, the whole process exits: there is nothing
/// meaningful to hand back to the caller.
///
/// # Errors
///
/// Returns `SearchError` if the terminal cannot be set up or the HTTP
/// client cannot be built.
pub fn run_interactive_search(
    initial_query: Option<&str>,
    config: &SearchConfig,
) -> Result<String> {
    let fetcher = Arc::new(Fetcher::from_config(config, CredentialCell::shared())?);
    let sources = CredentialSources::from_config(config);
    let picker = RatatuiPicker::new(config.poll_interval());

    match picker.pick(fetcher, &sources, initial_query) {
        Ok(SessionOutcome::Settled(reference)) => Ok(reference),
        Ok(SessionOutcome::Aborted) => {
            tracing::info!("search aborted without a selection");
            std::process::exit(ABORT_EXIT_CODE);
        }
        Err(err) if err.is_fatal_payload() => {
            tracing::error!(error = %err, "terminating on malformed search payload");
            eprintln!("GitHub search API request failed.");
            std::process::exit(FATAL_EXIT_CODE);
        }
        Err(err) => Err(err),
    }
}
