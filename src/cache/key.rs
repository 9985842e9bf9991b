//! Buffer keys.

use std::fmt;

/// Which conversation a locally buffered message belongs to.
///
/// `Unassigned` holds messages sent before the server has announced an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConversationKey {
    Unassigned,
    Id(String),
}

impl ConversationKey {
    /// Key for an optional id. An empty id counts as no id.
    pub fn for_conversation(conversation_id: Option<&str>) -> Self {
        match conversation_id {
            Some(id) if !id.is_empty() => ConversationKey::Id(id.to_string()),
            _ => ConversationKey::Unassigned,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            ConversationKey::Id(id) => Some(id),
            ConversationKey::Unassigned => None,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, ConversationKey::Unassigned)
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationKey::Unassigned => write!(f, "unassigned"),
            ConversationKey::Id(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for ConversationKey {
    fn from(id: &str) -> Self {
        Self::for_conversation(Some(id))
    }
}

impl From<String> for ConversationKey {
    fn from(id: String) -> Self {
        if id.is_empty() {
            ConversationKey::Unassigned
        } else {
            ConversationKey::Id(id)
        }
    }
}

impl From<Option<String>> for ConversationKey {
    fn from(id: Option<String>) -> Self {
        id.map(Self::from).unwrap_or(ConversationKey::Unassigned)
    }
}
