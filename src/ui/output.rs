//! Output sinks
//!
//! Fetch failures are reported through an [`OutputWriter`] rather than as
//! errors, so a failed request shows up inline while the session keeps
//! running. The TUI uses [`StatusBarWriter`]; the binary writes to the
//! terminal with [`StdoutWriter`] once the TUI is gone.

use colored::Colorize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use reposearch::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("https://github.com/ratatui/ratatui.git#main");
/// output.error("Something went wrong");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);

    /// Clear all messages (for TUI status bars)
    fn clear(&self);
}

/// CLI implementation - normal output to stdout, diagnostics to stderr
///
/// Only [`OutputWriter::write`] touches stdout, so the selected reference
/// can be captured by a shell pipeline.
pub struct StdoutWriter;

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    fn info(&self, message: &str) {
        eprintln!("{}", message.dimmed());
    }

    fn clear(&self) {
        // No-op for CLI
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Normal message
    Normal,
    /// Error message
    Error,
    /// Warning message
    Warning,
    /// Info message
    Info,
}

/// Buffered writer for the TUI status bar
///
/// Messages expire after a TTL. The writer is shared between the render
/// loop and fetch workers, so it only needs `&self`.
///
/// # Examples
///
/// ```
/// use reposearch::ui::output::{OutputWriter, StatusBarWriter};
/// use std::time::Duration;
///
/// let writer = StatusBarWriter::with_ttl(Duration::from_secs(5));
/// writer.error("GitHub search API request failed with status:403");
///
/// let (_, latest) = writer.latest_message().unwrap();
/// assert!(latest.contains("403"));
/// ```
#[derive(Debug)]
pub struct StatusBarWriter {
    messages: Mutex<Vec<(MessageLevel, String, Instant)>>,
    ttl: Duration,
}

impl StatusBarWriter {
    /// Create a new status bar writer with default TTL (10 seconds)
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(10))
    }

    /// Create a new status bar writer with custom TTL
    #[must_use]
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(MessageLevel, String, Instant)>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get recent messages for display (within TTL)
    #[must_use]
    pub fn recent_messages(&self) -> Vec<(MessageLevel, String)> {
        let now = Instant::now();

        self.lock()
            .iter()
            .filter(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .map(|(level, msg, _)| (*level, msg.clone()))
            .collect()
    }

    /// Get the most recent message, if any
    #[must_use]
    pub fn latest_message(&self) -> Option<(MessageLevel, String)> {
        let now = Instant::now();

        self.lock()
            .iter()
            .rev()
            .find(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .map(|(level, msg, _)| (*level, msg.clone()))
    }

    /// Get count of active messages
    #[must_use]
    pub fn message_count(&self) -> usize {
        let now = Instant::now();

        self.lock()
            .iter()
            .filter(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .count()
    }

    fn add_message(&self, level: MessageLevel, message: String) {
        let now = Instant::now();
        let mut messages = self.lock();
        // Expired messages are never shown again
        messages.retain(|(_, _, time)| now.duration_since(*time) < self.ttl);
        messages.push((level, message, now));

        // Keep only last 100 messages
        if messages.len() > 100 {
            messages.drain(0..50);
        }
    }
}

impl Default for StatusBarWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StatusBarWriter {
    fn write(&self, message: &str) {
        self.add_message(MessageLevel::Normal, message.to_string());
    }

    fn error(&self, message: &str) {
        self.add_message(MessageLevel::Error, message.to_string());
    }

    fn warning(&self, message: &str) {
        self.add_message(MessageLevel::Warning, message.to_string());
    }

    fn info(&self, message: &str) {
        self.add_message(MessageLevel::Info, message.to_string());
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
