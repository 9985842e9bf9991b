use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Message;

/// One entry of the conversation list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationSummary {
    #[serde(alias = "conversation_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message_count: Option<u64>,
}

/// Response of `GET /chat/conversations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationsPage {
    #[serde(default, alias = "items", alias = "data")]
    pub conversations: Vec<ConversationSummary>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl ConversationsPage {
    /// Whether another page exists after this one, when the server says so.
    pub fn has_more(&self) -> bool {
        match (self.total, self.offset) {
            (Some(total), Some(offset)) => {
                (offset as u64 + self.conversations.len() as u64) < total
            }
            _ => false,
        }
    }
}

/// Response of `GET /chat/conversation/{id}`: one page of history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationDetails {
    #[serde(alias = "id")]
    pub conversation_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, alias = "cursor")]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: Option<bool>,
}

impl ConversationDetails {
    /// Cursor for the following page, or `None` when this is the last one.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more == Some(false) {
            return None;
        }
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// The full fetched history of one conversation, oldest message first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationSnapshot {
    pub conversation_id: String,
    pub title: Option<String>,
    pub messages: Vec<Message>,
}

impl ConversationSnapshot {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            ..Self::default()
        }
    }

    /// Append one fetched page. The first non-empty title wins.
    pub fn extend_page(&mut self, page: ConversationDetails) {
        if self.title.is_none() {
            self.title = page.title.filter(|t| !t.is_empty());
        }
        self.messages.extend(page.messages);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversations_page_from_items_alias() {
        let json = r#"{"items":[{"conversation_id":"c1","title":"Hi"}],"total":3,"offset":0,"limit":1}"#;
        let page: ConversationsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.conversations.len(), 1);
        assert_eq!(page.conversations[0].id, "c1");
        assert!(page.has_more());
    }

    #[test]
    fn test_conversations_page_without_total() {
        let page: ConversationsPage = serde_json::from_str(r#"{"conversations":[]}"#).unwrap();
        assert!(!page.has_more());
    }

    #[test]
    fn test_details_continuation() {
        let json = r#"{"id":"c1","messages":[{"role":"user","content":"a"}],"next_cursor":"abc"}"#;
        let details: ConversationDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.conversation_id, "c1");
        assert_eq!(details.continuation(), Some("abc"));

        let last = ConversationDetails {
            has_more: Some(false),
            ..details.clone()
        };
        assert_eq!(last.continuation(), None);

        let empty_cursor = ConversationDetails {
            next_cursor: Some(String::new()),
            ..details
        };
        assert_eq!(empty_cursor.continuation(), None);
    }

    #[test]
    fn test_snapshot_extend_page() {
        let mut snapshot = ConversationSnapshot::new("c1");
        snapshot.extend_page(ConversationDetails {
            conversation_id: "c1".to_string(),
            title: Some("Trip".to_string()),
            messages: vec![Message::user("a")],
            next_cursor: Some("p2".to_string()),
            has_more: None,
        });
        snapshot.extend_page(ConversationDetails {
            conversation_id: "c1".to_string(),
            title: Some("Other".to_string()),
            messages: vec![Message::assistant("b")],
            next_cursor: None,
            has_more: Some(false),
        });

        assert_eq!(snapshot.title.as_deref(), Some("Trip"));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.messages[1].content, "b");
    }
}
