//! Conversation state and stream consumption.
//!
//! - `conversation` - Transcript with one active assistant message at a time
//! - `consume` - Applies decoded frames to the transcript

mod consume;
mod conversation;

pub use consume::{consume_stream, StreamSummary};
pub use conversation::{Conversation, Flow, SubmitRejected, DEMAND_LETTER_LABEL};
