//! Drive a frame stream into a [`Conversation`].

use futures::{Stream, StreamExt};
use serde_json::Value;
use tracing::{error, info, warn};

use super::Conversation;
use crate::error::StreamError;
use crate::models::StreamPayload;

/// Counts for one consumed stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamSummary {
    /// Frames received
    pub frames: usize,
    /// Frames that changed the conversation
    pub applied: usize,
    /// Frames dropped because their payload was not valid JSON
    pub skipped: usize,
    /// Metadata from the last metadata frame
    pub metadata: Option<Value>,
}

/// Apply every frame of `frames` to the active message of `conversation`.
///
/// `on_delta` sees each text delta as it is applied. A frame whose payload
/// does not parse is logged and skipped; the rest of the stream still
/// applies. A transport failure fails the active message with its flow's
/// placeholder and is returned.
pub async fn consume_stream<S, F>(
    mut frames: S,
    conversation: &mut Conversation,
    mut on_delta: F,
) -> Result<StreamSummary, StreamError>
where
    S: Stream<Item = Result<String, StreamError>> + Unpin,
    F: FnMut(&str),
{
    let mut summary = StreamSummary::default();

    while let Some(frame) = frames.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) if err.is_fatal() => {
                error!(error = %err, frames = summary.frames, "Answer stream failed");
                conversation.fail_active();
                return Err(err);
            }
            Err(err) => {
                warn!(error = %err, "Skipping undecodable frame");
                summary.frames += 1;
                summary.skipped += 1;
                continue;
            }
        };
        summary.frames += 1;

        let payload = match StreamPayload::parse(&frame) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, frame = %frame, "Skipping frame with invalid payload");
                summary.skipped += 1;
                continue;
            }
        };

        if let Some(delta) = payload.delta() {
            on_delta(delta);
        }
        if conversation.apply_payload(&payload) {
            summary.applied += 1;
        }
        if payload.metadata.is_some() {
            summary.metadata = payload.metadata;
        }
    }

    conversation.finish();
    info!(
        frames = summary.frames,
        applied = summary.applied,
        skipped = summary.skipped,
        "Answer stream finished"
    );
    Ok(summary)
}
