//! Prelude module for convenient imports.
//!
//! ```ignore
//! use chatline::prelude::*;
//! ```

pub use crate::cache::{ConversationKey, MessageReconciler};
pub use crate::chat::ChatClient;
pub use crate::config::ClientConfig;
pub use crate::conversations::ConversationClient;
pub use crate::error::{AuthError, ChatError, ChatResult, DecodeError, TransportError};
pub use crate::models::{ConversationSnapshot, Message, MessageRole};
pub use crate::session::{
    ChannelCallbacks, TurnCallbacks, TurnOutcome, TurnSession, TurnState, TurnUpdate,
};
pub use crate::sse::{EventRecord, LineDecoder};
pub use crate::traits::{CredentialsProvider, HttpClient};
