//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal could not be prepared for the TUI
    #[error("Failed to set up terminal: {0}")]
    SetupError(#[source] std::io::Error),

    /// Drawing or polling input failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
