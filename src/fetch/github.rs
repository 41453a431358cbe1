//! reqwest-backed repository source

use super::error::FetchError;
use super::traits::RepoSource;
use super::types::{HttpReply, SearchRequestParams};
use crate::config::SearchConfig;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};

/// Media type requested from the search API
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Repository source talking to GitHub and the trending service
#[derive(Debug, Clone)]
pub struct GithubSource {
    client: Client,
    search_endpoint: String,
    trending_endpoint: String,
}

impl GithubSource {
    /// Build a source from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self, FetchError> {
        // reqwest would otherwise give up on every request after 30s
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            search_endpoint: config.search_endpoint.clone(),
            trending_endpoint: config.trending_endpoint.clone(),
        })
    }

    fn send(request: RequestBuilder) -> Result<HttpReply, FetchError> {
        let response = request.send().map_err(FetchError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(FetchError::transport)?;
        Ok(HttpReply { status, body })
    }
}

impl RepoSource for GithubSource {
    fn trending(&self) -> Result<HttpReply, FetchError> {
        tracing::debug!(url = %self.trending_endpoint, "requesting trending repositories");
        Self::send(self.client.get(&self.trending_endpoint))
    }

    fn search(
        &self,
        params: &SearchRequestParams,
        token: Option<&str>,
    ) -> Result<HttpReply, FetchError> {
        tracing::debug!(q = %params.q, authenticated = token.is_some(), "searching repositories");

        let mut request = self
            .client
            .get(&self.search_endpoint)
            .header(ACCEPT, GITHUB_ACCEPT)
            .query(params);

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        Self::send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use std::time::{Duration, Instant};

    /// Config pointing both endpoints at a listener that never answers
    fn silent_server() -> (TcpListener, SearchConfig) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let config = SearchConfig {
            search_endpoint: format!("http://{addr}/search/repositories"),
            trending_endpoint: format!("http://{addr}/api/repos"),
            ..SearchConfig::default()
        };
        (listener, config)
    }

    #[test]
    fn test_source_from_default_config() {
        let source = GithubSource::from_config(&SearchConfig::default()).unwrap();
        assert_eq!(source.search_endpoint, crate::config::DEFAULT_SEARCH_ENDPOINT);
        assert_eq!(source.trending_endpoint, crate::config::DEFAULT_TRENDING_ENDPOINT);
    }

    #[test]
    fn test_search_request_shape() {
        let source = GithubSource::from_config(&SearchConfig::default()).unwrap();
        let request = source
            .client
            .get(&source.search_endpoint)
            .header(ACCEPT, GITHUB_ACCEPT)
            .query(&SearchRequestParams::new("rust lang"))
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://api.github.com/search/repositories?q=rust+lang&limit=20&per_page=8"
        );
        assert_eq!(request.headers()[ACCEPT], GITHUB_ACCEPT);
    }

    #[test]
    fn test_hung_search_is_not_cut_short() {
        let (_listener, config) = silent_server();
        let source = GithubSource::from_config(&config).unwrap();

        let (done, finished) = mpsc::channel();
        thread::spawn(move || {
            let _ = done.send(source.search(&SearchRequestParams::new("rust"), None));
        });

        // Still waiting well past any short client-side deadline
        assert!(finished.recv_timeout(Duration::from_secs(3)).is_err());
    }

    #[test]
    fn test_configured_request_timeout_applies() {
        let (_listener, mut config) = silent_server();
        config.request_timeout_secs = Some(1);
        let source = GithubSource::from_config(&config).unwrap();

        let started = Instant::now();
        let err = source.search(&SearchRequestParams::new("rust"), None).unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
