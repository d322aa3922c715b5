//! Prelude module for convenient imports.
//!
//! ```ignore
//! use docqa::prelude::*;
//! ```
//!
//! This will import:
//! - The API client and its configuration
//! - Conversation types and the stream consumer
//! - The frame decoder
//! - Error types

// Client
pub use crate::client::{ApiClient, FrameStream};
pub use crate::config::ClientConfig;

// Conversation
pub use crate::chat::{consume_stream, Conversation, StreamSummary, SubmitRejected};
pub use crate::models::{Message, MessageRole, QueryRequest, StreamPayload};

// Decoding
pub use crate::sse::{decode_frames, DecoderState, FrameDecoder, RawChunk};

// Errors
pub use crate::error::{ApiError, ApiResult, ErrorCategory, StreamError};
