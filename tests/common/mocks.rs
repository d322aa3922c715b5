//! Mock configurations for test fixtures.
//!
//! Re-exports the mock HTTP client from `docqa::adapters::mock` and adds a
//! builder for the backend responses the tests need.

pub use docqa::adapters::mock::{MockHttpClient, MockResponse};
pub use docqa::traits::{Headers, HttpClient, HttpError, Response};

use bytes::Bytes;
use docqa::client::ApiClient;
use docqa::config::ClientConfig;

/// Base URL used for mock-backed clients
pub const MOCK_BASE: &str = "http://docqa.test";

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a JSON response for an `/api/` path.
    pub fn with_json_response(self, api_path: &str, status: u16, json: &str) -> Self {
        self.client.set_response(
            &api_url(api_path),
            MockResponse::Success(Response::new(status, Bytes::from(json.to_string()))),
        );
        self
    }

    /// Configures a streamed body for an `/api/` path.
    pub fn with_stream(self, api_path: &str, chunks: &[&str]) -> Self {
        self.client.set_response(
            &api_url(api_path),
            MockResponse::Stream(chunks.iter().map(|c| Bytes::from(c.to_string())).collect()),
        );
        self
    }

    /// Configures a streamed body that fails after `chunks`.
    pub fn with_broken_stream(self, api_path: &str, chunks: &[&str], message: &str) -> Self {
        self.client.set_response(
            &api_url(api_path),
            MockResponse::StreamThenError(
                chunks.iter().map(|c| Bytes::from(c.to_string())).collect(),
                HttpError::Io(message.to_string()),
            ),
        );
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }

    /// Builds an ApiClient over the configured mock, keeping a handle for
    /// request assertions.
    pub fn build_client(self) -> (ApiClient<MockHttpClient>, MockHttpClient) {
        let http = self.client;
        let config = ClientConfig::new().with_base_url(MOCK_BASE);
        (ApiClient::with_http_client(config, http.clone()), http)
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn api_url(api_path: &str) -> String {
    format!("{}/api/{}", MOCK_BASE, api_path)
}
