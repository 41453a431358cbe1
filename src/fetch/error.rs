//! Fetch error types

use thiserror::Error;

/// Errors that can occur while fetching results
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read
    #[error("GitHub search API request failed: {message}")]
    Transport {
        /// Human readable cause
        message: String,
        /// Underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// A 2xx body that is not JSON
    #[error("Invalid GitHub search API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A search response without a numeric `total_count`
    #[error("Malformed GitHub search API payload: total_count is {found}")]
    MalformedPayload {
        /// What was found in place of the count
        found: String,
    },
}

impl FetchError {
    /// Wrap a transport failure
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the session cannot continue after this error
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_malformed_payload_is_fatal() {
        let malformed = FetchError::MalformedPayload {
            found: "null".to_string(),
        };
        assert!(malformed.is_fatal());

        let transport = FetchError::transport(std::io::Error::other("connection reset"));
        assert!(!transport.is_fatal());
        assert!(transport.to_string().contains("connection reset"));

        let decode = FetchError::from(serde_json::from_str::<u32>("nope").unwrap_err());
        assert!(!decode.is_fatal());
    }
}
