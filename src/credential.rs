//! Bearer credential lookup
//!
//! A token is taken from an environment variable when set, otherwise from
//! the `hub` credential store (`~/.config/hub`), which looks like:
//!
//! ```yaml
//! github.com:
//! - user: octocat
//!   oauth_token: ghp_xxx
//!   protocol: https
//! ```
//!
//! Lookup happens at most once per process; the answer, including "no
//! token", is kept in a [`CredentialCell`].

use crate::config::SearchConfig;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Where to look for a credential
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialSources {
    /// Environment variable name; empty disables the lookup
    pub env_var: String,
    /// Path to the hub credential file, if any
    pub hub_path: Option<PathBuf>,
    /// Hostname matched against the hub file's keys
    pub hostname: String,
}

impl CredentialSources {
    /// Build sources from configuration
    ///
    /// Falls back to `<home>/.config/hub` when no override is configured.
    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        let hub_path = config
            .hub_config
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config").join("hub")));

        Self {
            env_var: config.token_env.clone(),
            hub_path,
            hostname: config.hostname.clone(),
        }
    }

    /// Sources that never yield a token
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Run the lookup against the live environment and filesystem
    #[must_use]
    pub fn lookup(&self) -> Option<String> {
        let env_value = if self.env_var.is_empty() {
            None
        } else {
            std::env::var(&self.env_var).ok()
        };

        resolve_token(env_value.as_deref(), self.hub_path.as_deref(), &self.hostname)
    }
}

/// Resolve a token from an environment value and a hub file
///
/// The environment value wins when it is non-empty after trimming.
#[must_use]
pub fn resolve_token(
    env_value: Option<&str>,
    hub_path: Option<&Path>,
    hostname: &str,
) -> Option<String> {
    if let Some(token) = env_value.map(str::trim).filter(|t| !t.is_empty()) {
        tracing::debug!("using token from environment");
        return Some(token.to_string());
    }

    let path = hub_path?;
    if !path.exists() {
        return None;
    }

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "hub config unreadable");
            return None;
        }
    };

    let token = token_from_hub_config(&text, hostname);
    if token.is_some() {
        tracing::debug!(path = %path.display(), "using token from hub config");
    }
    token
}

/// Find the `oauth_token` for `hostname` in hub config text
///
/// The first key containing `hostname` (case-insensitive) is used; within
/// its list, the first entry carrying an `oauth_token` wins.
#[must_use]
pub fn token_from_hub_config(text: &str, hostname: &str) -> Option<String> {
    let document: Value = serde_yaml::from_str(text).ok()?;
    let Value::Mapping(hosts) = document else {
        return None;
    };

    let needle = hostname.to_lowercase();
    let (_, entries) = hosts.iter().find(|(key, _)| {
        key.as_str()
            .is_some_and(|host| host.to_lowercase().contains(&needle))
    })?;

    entries
        .as_sequence()?
        .iter()
        .find_map(|entry| entry.get("oauth_token").and_then(Value::as_str))
        .map(ToOwned::to_owned)
}

/// Write-once holder for the resolved credential
#[derive(Debug, Default)]
pub struct CredentialCell {
    token: OnceLock<Option<String>>,
}

impl CredentialCell {
    /// Create an empty, unresolved cell
    #[must_use]
    pub const fn new() -> Self {
        Self {
            token: OnceLock::new(),
        }
    }

    /// The process-wide cell
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<CredentialCell>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    /// Resolve the credential, or return the answer from an earlier call
    pub fn resolve(&self, sources: &CredentialSources) -> Option<&str> {
        self.token.get_or_init(|| sources.lookup()).as_deref()
    }

    /// The resolved token, if resolution has happened and found one
    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.token.get().and_then(Option::as_deref)
    }

    /// Whether resolution has already happened
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.token.get().is_some()
    }
}
