//! Command-line interface definitions and parsing
//!
//! Every positional word is part of the initial query, so
//! `reposearch rust tui` opens the picker already searching for `rust tui`.
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use reposearch::cli::Cli;
//!
//! let cli = Cli::parse_from(["reposearch", "rust", "tui"]);
//! assert_eq!(cli.initial_query().as_deref(), Some("rust tui"));
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "reposearch")]
#[command(
    about = "Search GitHub repositories interactively and print the chosen one",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Initial search query (words are joined with spaces)
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (overrides config)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the effective configuration as TOML and exit
    #[arg(long = "print-config")]
    pub print_config: bool,
}

impl Cli {
    /// Parse arguments from the process environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The initial query, if any words were given
    #[must_use]
    pub fn initial_query(&self) -> Option<String> {
        let query = self.query.join(" ");
        if query.trim().is_empty() {
            None
        } else {
            Some(query)
        }
    }
}
