//! Transcript state for question answering and demand-letter generation.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::ErrorCategory;
use crate::models::{Message, MessageRole, StreamPayload};

/// Label shown as the user turn when a demand letter is requested
pub const DEMAND_LETTER_LABEL: &str = "Generate a demand letter";

/// Why a new turn could not be started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("Input is empty")]
    Empty,
    #[error("An answer is still loading")]
    Busy,
}

impl SubmitRejected {
    pub fn error_code(&self) -> &'static str {
        match self {
            SubmitRejected::Empty => "E_SUBMIT_EMPTY",
            SubmitRejected::Busy => "E_SUBMIT_BUSY",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::User
    }
}

/// Which request produced the active assistant message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Query,
    DemandLetter,
}

impl Flow {
    /// Text that replaces the assistant message when the request fails.
    pub fn failure_placeholder(&self) -> &'static str {
        match self {
            Flow::Query => "Error fetching response.",
            Flow::DemandLetter => "Failed to generate demand letter.",
        }
    }
}

/// An ordered transcript of user and assistant messages.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    flow: Option<Flow>,
    last_metadata: Option<Value>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Metadata reported by the most recent stream, if any.
    pub fn last_metadata(&self) -> Option<&Value> {
        self.last_metadata.as_ref()
    }

    /// The flow of the current or most recent turn.
    pub fn flow(&self) -> Option<Flow> {
        self.flow
    }

    /// True while the last message is still waiting for streamed content.
    pub fn is_busy(&self) -> bool {
        self.messages.last().is_some_and(|m| m.loading)
    }

    /// Start a question turn. Returns the trimmed question to send.
    pub fn submit(&mut self, text: &str) -> Result<String, SubmitRejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SubmitRejected::Empty);
        }
        self.start_turn(text, Flow::Query)?;
        Ok(text.to_string())
    }

    /// Start a demand-letter turn labelled `label`.
    pub fn begin(&mut self, label: &str) -> Result<(), SubmitRejected> {
        let label = label.trim();
        if label.is_empty() {
            return Err(SubmitRejected::Empty);
        }
        self.start_turn(label, Flow::DemandLetter)
    }

    fn start_turn(&mut self, text: &str, flow: Flow) -> Result<(), SubmitRejected> {
        if self.is_busy() {
            return Err(SubmitRejected::Busy);
        }
        self.messages.push(Message::user(text));
        self.messages.push(Message::pending_assistant());
        self.flow = Some(flow);
        self.last_metadata = None;
        Ok(())
    }

    fn active_mut(&mut self) -> Option<&mut Message> {
        self.messages
            .last_mut()
            .filter(|m| m.role == MessageRole::Assistant && m.loading)
    }

    /// Apply one decoded frame. Returns true if it changed anything.
    pub fn apply_payload(&mut self, payload: &StreamPayload) -> bool {
        let mut applied = false;

        if let Some(delta) = payload.delta() {
            if let Some(message) = self.active_mut() {
                message.append_token(delta);
                applied = true;
            } else {
                debug!("Delta received with no active message");
            }
        }

        if let Some(metadata) = &payload.metadata {
            info!(metadata = %metadata, "Stream metadata received");
            self.last_metadata = Some(metadata.clone());
            applied = true;
        }

        applied
    }

    /// Mark the active assistant message complete.
    pub fn finish(&mut self) {
        if let Some(message) = self.active_mut() {
            message.finalize();
        }
    }

    /// Mark the active assistant message failed, replacing its content.
    pub fn fail(&mut self, placeholder: &str) {
        if let Some(message) = self.active_mut() {
            message.fail(placeholder);
        }
    }

    /// Fail the active message with the placeholder for the current flow.
    pub fn fail_active(&mut self) {
        let placeholder = self.flow.unwrap_or(Flow::Query).failure_placeholder();
        self.fail(placeholder);
    }
}
