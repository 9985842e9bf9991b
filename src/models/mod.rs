mod conversation;
mod message;
mod request;

pub use conversation::{
    ConversationDetails, ConversationSnapshot, ConversationSummary, ConversationsPage,
};
pub use message::{Message, MessageRole, LOCAL_ID_KEY};
pub use request::{ChatStreamRequest, OutgoingMessage};
