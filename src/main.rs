//! Reposearch CLI application entry point
//!
//! Opens an interactive GitHub repository search in the terminal and prints
//! the canonical reference of the chosen repository to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Start with the trending list
//! reposearch
//!
//! # Start with a query
//! reposearch terminal ui
//!
//! # Clone whatever gets picked
//! git clone "$(reposearch rust http client | cut -d'#' -f1)"
//!
//! # Show the effective configuration
//! reposearch --print-config
//! ```
//!
//! # Exit status
//!
//! - `0` a repository was chosen and printed
//! - `1` setup failed, or the search service returned an unusable payload
//! - `130` the picker was closed without a choice
//!
//! # Configuration
//!
//! Configuration is read from the user's config directory
//! (`~/.config/reposearch/config.toml` on Linux) when present, then from
//! `REPOSEARCH_*` environment variables.

use reposearch::{
    SearchConfig, SearchError,
    cli::Cli,
    logging,
    run_interactive_search,
    ui::{OutputWriter, StdoutWriter},
};

type Result<T> = std::result::Result<T, SearchError>;

fn load_config(cli: &Cli) -> Result<SearchConfig> {
    let config = match &cli.config {
        Some(path) => SearchConfig::load_from(path)?,
        None => SearchConfig::load()?,
    };
    Ok(config)
}

fn run(cli: &Cli, output: &StdoutWriter) -> Result<()> {
    let config = load_config(cli)?;

    if cli.print_config {
        output.write(config.to_toml()?.trim_end());
        return Ok(());
    }

    let log_file = cli.log_file.as_deref().or(config.log_file.as_deref());
    logging::init_logging(log_file, cli.verbose)?;

    let initial_query = cli.initial_query();
    tracing::info!(query = initial_query.as_deref().unwrap_or(""), "starting search");

    let reference = run_interactive_search(initial_query.as_deref(), &config)?;
    output.write(&reference);
    Ok(())
}

fn main() {
    let cli = Cli::parse_args();
    let output = StdoutWriter::new();

    if let Err(e) = run(&cli, &output) {
        tracing::error!(error = %e, "reposearch failed");
        output.error(&e.to_string());
        std::process::exit(reposearch::FATAL_EXIT_CODE);
    }
}
