//! Errors returned by [`ApiClient`](crate::client::ApiClient) calls.

use serde_json::Value;
use thiserror::Error;

use super::{ErrorCategory, StreamError};
use crate::traits::HttpError;

/// Error type for backend API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("HTTP error: {0}")]
    Http(HttpError),

    /// Server returned a non-2xx status; `payload` is the parsed JSON body
    #[error("Server error ({status}): {}", detail_of(.payload))]
    Status { status: u16, payload: Value },

    /// A 2xx body did not have the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Streaming failed after the response started
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// FastAPI-style bodies carry the message under `detail`; fall back to the whole body.
fn detail_of(payload: &Value) -> String {
    match payload.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(other) => other.to_string(),
        None => match payload {
            Value::String(text) => text.clone(),
            Value::Null => "no details".to_string(),
            other => other.to_string(),
        },
    }
}

/// Parse an error body as JSON, keeping non-JSON bodies as a string value.
pub fn error_payload(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            // Streaming endpoints reject non-2xx inside the transport; surface those as Status
            HttpError::ServerError { status, message } => ApiError::Status {
                status,
                payload: error_payload(message.as_bytes()),
            },
            other => ApiError::Http(other),
        }
    }
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable detail from the server's error body.
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Status { payload, .. } => Some(detail_of(payload)),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Http(_) => ErrorCategory::Network,
            ApiError::Status { status, .. } if *status >= 500 => ErrorCategory::Server,
            ApiError::Status { .. } => ErrorCategory::User,
            ApiError::Json(_) => ErrorCategory::Client,
            ApiError::Stream(err) => ErrorCategory::from(err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Http(_) => "E_API_HTTP",
            ApiError::Status { .. } => "E_API_STATUS",
            ApiError::Json(_) => "E_API_JSON",
            ApiError::Stream(err) => err.error_code(),
        }
    }
}
