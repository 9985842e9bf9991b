use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Metadata key under which locally created messages carry their client id.
pub const LOCAL_ID_KEY: &str = "local_id";

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a transcript. Never mutated after construction.
///
/// History records carry no stable per-message id, so two messages with the
/// same role and content are still two messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            metadata: Map::new(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// A locally originated message tagged with a fresh client id.
    pub fn local(role: MessageRole, content: impl Into<String>) -> Self {
        Self::new(role, content).with_metadata(LOCAL_ID_KEY, Uuid::new_v4().to_string())
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Client id assigned by [`Message::local`], if any.
    pub fn local_id(&self) -> Option<&str> {
        self.metadata.get(LOCAL_ID_KEY).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(MessageRole::System.to_string(), "system");
    }

    #[test]
    fn test_deserialize_history_record() {
        let json = r#"{
            "id": "m1",
            "chatId": "c1",
            "role": "user",
            "content": "hi",
            "createdAt": "2025-01-02T03:04:05Z"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "hi");
        assert!(msg.metadata.is_empty());
        assert_eq!(msg.created_at.to_rfc3339(), "2025-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_local_messages_get_distinct_ids() {
        let a = Message::local(MessageRole::User, "same");
        let b = Message::local(MessageRole::User, "same");
        assert!(a.local_id().is_some());
        assert_ne!(a.local_id(), b.local_id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_with_metadata() {
        let msg = Message::assistant("x").with_metadata("model", "m-1");
        assert_eq!(msg.metadata.get("model"), Some(&Value::from("m-1")));
        assert_eq!(msg.local_id(), None);
    }
}
