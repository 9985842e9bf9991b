use serde::{Deserialize, Serialize};

use super::message::MessageRole;

/// A message as sent in the streaming request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Body of `POST /chat/stream`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatStreamRequest {
    pub messages: Vec<OutgoingMessage>,
    pub stream: bool,
    pub user_id: String,
    /// Absent when starting a new conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl ChatStreamRequest {
    /// Request carrying a single user message.
    pub fn new(content: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            messages: vec![OutgoingMessage {
                role: MessageRole::User,
                content: content.into(),
            }],
            stream: true,
            user_id: user_id.into(),
            conversation_id: None,
        }
    }

    pub fn with_conversation(mut self, conversation_id: Option<String>) -> Self {
        self.conversation_id = conversation_id;
        self
    }
}
