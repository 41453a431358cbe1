//! Log setup
//!
//! The TUI owns the terminal, so logs only ever go to a file. Without a log
//! file no subscriber is installed and every `tracing` event is a no-op.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for a `-v` count
#[must_use]
pub const fn directive_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "reposearch=warn",
        1 => "reposearch=debug",
        _ => "reposearch=trace",
    }
}

/// Build the event filter
///
/// `-v` wins over `RUST_LOG`; without it `RUST_LOG` is honored when set.
fn filter_for(verbosity: u8) -> EnvFilter {
    if verbosity > 0 {
        return EnvFilter::new(directive_for(verbosity));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive_for(0)))
}

/// Install a subscriber that appends to `log_file`
///
/// Returns whether a subscriber was installed. A subscriber that is already
/// installed is left in place.
///
/// # Errors
///
/// Returns an I/O error if the log file cannot be opened.
pub fn init_logging(log_file: Option<&Path>, verbosity: u8) -> std::io::Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let installed = tracing_subscriber::registry()
        .with(filter_for(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_thread_names(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(path = %path.display(), "logging initialized");
    }
    Ok(installed)
}
