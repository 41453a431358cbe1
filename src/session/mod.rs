//! Search session controller
//!
//! A [`Session`] owns everything that changes while the picker is open: the
//! query, the query cache, the reply channel from fetch workers and the
//! lifecycle phase. The terminal adapter drives it with input events and
//! renders from it, but never decides what a keystroke or a reply means.
//!
//! ```text
//!   Active ──select(value)──▶ Resolving ──settle()──▶ Settled
//!     │
//!     └──abort()──▶ Aborted
//! ```

use crate::credential::CredentialSources;
use crate::dispatch::{Dispatch, FetchReply, FetchWorker, QueryCache, cache_key};
use crate::fetch::{FetchError, Fetcher, ResultEntry};
use crate::ui::ratatui_adapter::AppState;
use crate::ui::{MessageLevel, OutputWriter, StatusBarWriter};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Waiting for input or a selection
    #[default]
    Active,
    /// A value was chosen; the UI is being torn down
    Resolving,
    /// The outcome has been handed over
    Settled,
    /// The UI ended without a selection
    Aborted,
}

/// Final result of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The chosen canonical reference
    Settled(String),
    /// The user left without choosing
    Aborted,
}

/// State machine behind one interactive search
pub struct Session {
    /// Query and list cursor
    pub state: AppState,
    cache: QueryCache,
    worker: FetchWorker,
    replies: Receiver<FetchReply>,
    sink: Arc<StatusBarWriter>,
    phase: SessionPhase,
    chosen: Option<String>,
}

impl Session {
    /// Create a session seeded with an optional initial query
    #[must_use]
    pub fn new(fetcher: Arc<Fetcher>, initial_query: Option<&str>) -> Self {
        Self::with_sink(fetcher, initial_query, Arc::new(StatusBarWriter::new()))
    }

    /// Create a session reporting to a specific status sink
    #[must_use]
    pub fn with_sink(
        fetcher: Arc<Fetcher>,
        initial_query: Option<&str>,
        sink: Arc<StatusBarWriter>,
    ) -> Self {
        let (worker, replies) = FetchWorker::channel(fetcher, sink.clone());
        Self {
            state: AppState::new(initial_query.unwrap_or_default()),
            cache: QueryCache::new(),
            worker,
            replies,
            sink,
            phase: SessionPhase::Active,
            chosen: None,
        }
    }

    /// Apply the credential and request results for the initial query
    pub fn start(&mut self, sources: &CredentialSources) {
        self.worker.fetcher().apply_credential(sources);
        self.query_changed();
    }

    /// Current lifecycle phase
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current query text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.state.query
    }

    /// Results to render for the current query
    #[must_use]
    pub fn visible(&self) -> &[ResultEntry] {
        self.cache.visible()
    }

    /// Whether results for the current query are still loading
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.cache.is_pending()
    }

    /// Recent status messages
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.sink.recent_messages()
    }

    /// The entry under the list cursor
    #[must_use]
    pub fn highlighted(&self) -> Option<&ResultEntry> {
        self.visible().get(self.state.cursor)
    }

    /// React to an edit of the query text
    pub fn query_changed(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }

        let key = cache_key(&self.state.query);
        if let Dispatch::Fetch(key) = self.cache.dispatch(&key) {
            if let Err(e) = self.worker.spawn(key.clone()) {
                tracing::warn!(key = %key, error = %e, "could not start fetch");
                self.sink.error(&format!("Could not start search: {e}"));
                self.cache.fail(&key);
            }
        }
        self.state.reset_cursor();
    }

    /// Take in fetch replies
    ///
    /// Waits up to `wait` for the first reply, then drains whatever else is
    /// queued without blocking. Returns whether anything arrived.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when a reply carries a fatal payload error.
    pub fn pump(&mut self, wait: Duration) -> Result<bool, FetchError> {
        let mut received = false;

        let first = if wait.is_zero() {
            self.replies.try_recv().map_err(|e| match e {
                TryRecvError::Empty => RecvTimeoutError::Timeout,
                TryRecvError::Disconnected => RecvTimeoutError::Disconnected,
            })
        } else {
            self.replies.recv_timeout(wait)
        };

        if let Ok(reply) = first {
            self.apply_reply(reply)?;
            received = true;
            while let Ok(reply) = self.replies.try_recv() {
                self.apply_reply(reply)?;
            }
        }

        Ok(received)
    }

    fn apply_reply(&mut self, reply: FetchReply) -> Result<(), FetchError> {
        let FetchReply { key, outcome } = reply;
        match outcome {
            Ok(results) => {
                tracing::debug!(key = %key, count = results.len(), "reply received");
                self.cache.resolve(&key, results);
            }
            Err(e) if e.is_fatal() => {
                tracing::error!(key = %key, error = %e, "fatal search payload");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "search failed");
                self.sink.error(&e.to_string());
                self.cache.fail(&key);
            }
        }

        let len = self.visible().len();
        self.state.clamp_cursor(len);
        Ok(())
    }

    /// Choose a value
    ///
    /// Empty or missing values are ignored so an empty list cannot commit.
    /// Returns whether the session moved to [`SessionPhase::Resolving`].
    pub fn select(&mut self, value: Option<&str>) -> bool {
        if self.phase != SessionPhase::Active {
            return false;
        }

        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                tracing::info!(value, "repository selected");
                self.chosen = Some(value.to_string());
                self.phase = SessionPhase::Resolving;
                true
            }
            None => false,
        }
    }

    /// Choose the highlighted entry
    pub fn select_highlighted(&mut self) -> bool {
        let value = self.highlighted().map(|entry| entry.value.clone());
        self.select(value.as_deref())
    }

    /// Record that the UI ended without a selection
    pub fn abort(&mut self) {
        if self.phase == SessionPhase::Active {
            self.phase = SessionPhase::Aborted;
        }
    }

    /// Hand over the chosen value once the UI is torn down
    pub fn settle(&mut self) -> Option<String> {
        if self.phase != SessionPhase::Resolving {
            return None;
        }
        self.phase = SessionPhase::Settled;
        self.chosen.clone()
    }

    /// Final outcome of the session
    ///
    /// Anything short of a settled selection counts as aborted.
    #[must_use]
    pub fn into_outcome(mut self) -> SessionOutcome {
        if self.phase == SessionPhase::Resolving {
            self.settle();
        }

        match (self.phase, self.chosen) {
            (SessionPhase::Settled, Some(value)) => SessionOutcome::Settled(value),
            _ => SessionOutcome::Aborted,
        }
    }
}
