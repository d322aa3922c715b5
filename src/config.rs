//! Client configuration.
//!
//! Defaults can be overridden with the builder methods or, for the base URL,
//! with the `DOCQA_API_URL` environment variable.

use std::time::Duration;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "DOCQA_API_URL";

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for [`ApiClient`](crate::client::ApiClient).
///
/// # Example
///
/// ```ignore
/// use docqa::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://docs.example.com/")
///     .with_connect_timeout(std::time::Duration::from_secs(5));
/// assert_eq!(config.base_url, "https://docs.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,
    /// Timeout for establishing a connection. Streaming bodies have no deadline.
    pub connect_timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("docqa/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing `/` is trimmed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&url.into());
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Create config from the environment.
    /// Reads `DOCQA_API_URL`; blank values are ignored.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url.trim()),
            _ => Self::default(),
        }
    }

    /// Full URL of an `/api/` endpoint.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
