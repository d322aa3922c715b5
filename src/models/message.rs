use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single transcript entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message; grows while an answer is streaming
    pub content: String,
    /// Whether the message is still waiting for streamed content
    #[serde(default)]
    pub loading: bool,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// A finished user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            loading: false,
            created_at: Utc::now(),
        }
    }

    /// An empty assistant message waiting for its streamed answer.
    pub fn pending_assistant() -> Self {
        Self {
            role: MessageRole::Assistant,
            content: String::new(),
            loading: true,
            created_at: Utc::now(),
        }
    }

    /// Append a streamed delta to the content
    pub fn append_token(&mut self, token: &str) {
        self.content.push_str(token);
    }

    /// Mark the message complete, keeping what was streamed
    pub fn finalize(&mut self) {
        self.loading = false;
    }

    /// Mark the message complete, replacing its content with a placeholder
    pub fn fail(&mut self, placeholder: &str) {
        self.content = placeholder.to_string();
        self.loading = false;
    }
}
