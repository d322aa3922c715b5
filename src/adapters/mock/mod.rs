//! Mock implementations for testing.
//!
//! Lets the API client be exercised without network access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
