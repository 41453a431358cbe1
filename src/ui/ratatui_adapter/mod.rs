//! Ratatui-based repository picker adapter
//!
//! Implements the `RepoPicker` trait on top of ratatui (widgets) and
//! crossterm (terminal and events). The adapter only renders and forwards
//! input; every decision lives in [`crate::session::Session`].
//!
//! # Layout
//!
//! ```text
//! ┌ Search GitHub ──────────────────────────┐
//! │ > ratatui│                              │
//! └─────────────────────────────────────────┘
//! ┌ Repositories (8) ───────────────────────┐
//! │ > ratatui/ratatui | Rust library that … │
//! │   owner/other     | …                   │
//! └─────────────────────────────────────────┘
//! ┌ Status ─────────────────────────────────┐
//! └─────────────────────────────────────────┘
//! ↑↓:move  Enter:choose  ctrl+u:clear  ESC:cancel
//! ```

mod events;
mod picker;
mod state;
mod theme;
pub mod widgets;

pub use events::{EventResult, handle_key};
pub use picker::RatatuiPicker;
pub use state::AppState;
pub use theme::Theme;
