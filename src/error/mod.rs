//! Error handling for docqa.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Stream Errors**: Failures while decoding a streamed answer
//! - **API Errors**: Failures of a backend call, carrying the HTTP status and
//!   the parsed JSON error body when the server answered
//!
//! # Error Categories
//!
//! | Category | Description |
//! |----------|-------------|
//! | Network | Connection refused, stream dropped |
//! | Server | Backend errors (5xx) |
//! | Client | Unexpected response shape |
//! | User | Rejected input (4xx, validation) |
//! | System | Local file errors |
//!
//! A frame whose payload is not valid JSON is reported as
//! [`StreamError::InvalidPayload`] but never ends a stream: consumers log and
//! skip it. A truncated frame at end-of-stream is not an error at all.

mod api;
mod category;
mod stream;

pub use api::{error_payload, ApiError};
pub use category::ErrorCategory;
pub use stream::StreamError;

/// Result type alias for backend API calls.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<&StreamError> for ErrorCategory {
    fn from(err: &StreamError) -> Self {
        match err {
            StreamError::Transport { .. } => ErrorCategory::Network,
            StreamError::InvalidPayload { .. } => ErrorCategory::Server,
        }
    }
}
