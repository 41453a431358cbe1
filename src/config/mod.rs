//! Configuration module for reposearch
//!
//! Settings are layered: built-in defaults, then an optional TOML file in
//! the user's config directory (`~/.config/reposearch/config.toml` on Linux),
//! then `REPOSEARCH_*` environment variables.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default GitHub repository search endpoint
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.github.com/search/repositories";

/// Default endpoint listing trending repositories
pub const DEFAULT_TRENDING_ENDPOINT: &str = "https://trends.now.sh/api/repos";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Repository search endpoint
    pub search_endpoint: String,

    /// Endpoint used when the query is empty
    pub trending_endpoint: String,

    /// Base URL used to build clone references
    pub web_base_url: String,

    /// Hostname looked up in the hub credential file
    pub hostname: String,

    /// Environment variable holding a bearer token
    pub token_env: String,

    /// Override for the hub credential file (`~/.config/hub` by default)
    pub hub_config: Option<PathBuf>,

    /// User agent sent with every request
    pub user_agent: String,

    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds; requests may hang forever when unset
    pub request_timeout_secs: Option<u64>,

    /// How long the render loop waits for input before checking replies
    pub poll_interval_ms: u64,

    /// File receiving log output; logging is off when unset
    pub log_file: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            trending_endpoint: DEFAULT_TRENDING_ENDPOINT.to_string(),
            web_base_url: "https://github.com".to_string(),
            hostname: "github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            hub_config: None,
            user_agent: concat!("reposearch/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            poll_interval_ms: 50,
            log_file: None,
        }
    }
}

impl SearchConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("reposearch").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing config file is not an error; defaults and environment
    /// overrides still apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an environment override cannot
    /// be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from an explicit file path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an environment override cannot
    /// be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::builder(path)
            .add_source(Environment::with_prefix("REPOSEARCH").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Config builder without the environment layer
    fn builder(path: &Path) -> config::ConfigBuilder<config::builder::DefaultState> {
        Config::builder().add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(false),
        )
    }

    /// Render the effective configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Interval between input polls in the render loop
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Connect timeout for the HTTP client
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Whole-request timeout for the HTTP client, if any
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
