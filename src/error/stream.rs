//! Streaming-related error types.
//!
//! This module defines errors that occur while decoding a streamed answer.
//! A truncated tail at end-of-stream is not an error and has no variant here.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The transport failed or was aborted mid-stream.
    Transport {
        message: String,
    },

    /// A frame's payload is not valid JSON for the expected shape.
    InvalidPayload {
        message: String,
    },
}

impl StreamError {
    /// Check if this error ends the stream (as opposed to spoiling one frame).
    pub fn is_fatal(&self) -> bool {
        matches!(self, StreamError::Transport { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Transport { .. } => {
                "Connection to the server was lost while receiving the answer.".to_string()
            }
            StreamError::InvalidPayload { .. } => {
                "Received invalid data from server.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Transport { .. } => "E_STREAM_TRANSPORT",
            StreamError::InvalidPayload { .. } => "E_STREAM_PAYLOAD",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Transport { message } => {
                write!(f, "Stream transport failed: {}", message)
            }
            StreamError::InvalidPayload { message } => {
                write!(f, "Invalid frame payload: {}", message)
            }
        }
    }
}

impl std::error::Error for StreamError {}
