//! Background fetch workers
//!
//! Each dispatched key is fetched on its own short-lived thread. Replies
//! come back over a channel that the render loop drains between frames.

use crate::fetch::{FetchError, Fetcher, ResultSet};
use crate::ui::OutputWriter;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

/// Outcome of one background fetch
#[derive(Debug)]
pub struct FetchReply {
    /// Key the fetch was issued for
    pub key: String,
    /// Results or failure
    pub outcome: Result<ResultSet, FetchError>,
}

/// Spawns fetches and reports their replies
pub struct FetchWorker {
    fetcher: Arc<Fetcher>,
    sink: Arc<dyn OutputWriter>,
    replies: Sender<FetchReply>,
}

impl FetchWorker {
    /// Create a worker and the receiving end of its reply channel
    #[must_use]
    pub fn channel(
        fetcher: Arc<Fetcher>,
        sink: Arc<dyn OutputWriter>,
    ) -> (Self, Receiver<FetchReply>) {
        let (replies, receiver) = mpsc::channel();
        (
            Self {
                fetcher,
                sink,
                replies,
            },
            receiver,
        )
    }

    /// The fetcher used by this worker
    #[must_use]
    pub const fn fetcher(&self) -> &Arc<Fetcher> {
        &self.fetcher
    }

    /// Fetch `key` in the background
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn spawn(&self, key: String) -> std::io::Result<()> {
        let fetcher = Arc::clone(&self.fetcher);
        let sink = Arc::clone(&self.sink);
        let replies = self.replies.clone();

        tracing::debug!(key = %key, "dispatching fetch");
        thread::Builder::new()
            .name("reposearch-fetch".to_string())
            .spawn(move || {
                let outcome = fetcher.fetch(&key, sink.as_ref());
                // The session may be gone; nobody is left to tell
                let _ = replies.send(FetchReply { key, outcome });
            })
            .map(drop)
    }
}
