//! UI abstraction layer
//!
//! Business logic talks to the terminal through two seams:
//!
//! - **`RepoPicker`** - runs an interactive session and returns its outcome
//! - **`OutputWriter`** - status messages with severity levels
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Session (query cache, fetch replies)  │
//! └────────────────┬────────────────────────┘
//!                  │ driven by
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │   RepoPicker                            │
//! └────────────────┬────────────────────────┘
//!                  │ implemented by
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │   RatatuiPicker (ratatui + crossterm)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Implementing a Custom Picker
//!
//! ```no_run
//! use reposearch::{CredentialSources, Fetcher, Session, SessionOutcome};
//! use reposearch::ui::RepoPicker;
//! use std::sync::Arc;
//!
//! struct FirstHit;
//!
//! impl RepoPicker for FirstHit {
//!     fn pick(
//!         &self,
//!         fetcher: Arc<Fetcher>,
//!         sources: &CredentialSources,
//!         initial_query: Option<&str>,
//!     ) -> reposearch::Result<SessionOutcome> {
//!         let mut session = Session::new(fetcher, initial_query);
//!         session.start(sources);
//!         session.pump(std::time::Duration::from_secs(10))?;
//!         session.select_highlighted();
//!         Ok(session.into_outcome())
//!     }
//! }
//! ```
//!
//! ## Buffered Messages for TUI
//!
//! ```
//! use reposearch::ui::output::{OutputWriter, StatusBarWriter};
//! use std::time::Duration;
//!
//! let writer = StatusBarWriter::with_ttl(Duration::from_secs(5));
//! writer.error("GitHub search API request failed with status:403");
//!
//! for (level, msg) in writer.recent_messages() {
//!     println!("{:?}: {}", level, msg);
//! }
//! ```

mod error;
mod traits;

pub mod output;
pub mod ratatui_adapter;

#[cfg(test)]
pub mod mock;

pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StatusBarWriter, StdoutWriter};
pub use ratatui_adapter::RatatuiPicker;
pub use traits::RepoPicker;
