//! Local message buffering and reconciliation.
//!
//! Messages produced locally (the user's own message, the finalized
//! assistant reply) are held per conversation until the server-side history
//! is known to contain them. The displayed list is always the fetched
//! snapshot followed by that buffer.

mod key;
mod reconciliation;

pub use key::ConversationKey;

use std::collections::HashMap;

use tracing::trace;

use crate::models::Message;

/// Per-conversation buffers of locally produced messages.
///
/// Owned by one user session and passed by `&mut`; there is no internal
/// locking.
#[derive(Debug, Default, Clone)]
pub struct MessageReconciler {
    pub(crate) buffers: HashMap<ConversationKey, Vec<Message>>,
}

impl MessageReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a message under `key`, after anything already buffered there.
    ///
    /// Never deduplicates: appending the same message twice buffers it twice.
    pub fn append(&mut self, key: ConversationKey, message: Message) {
        trace!(key = %key, role = %message.role, "Buffering local message");
        self.buffers.entry(key).or_default().push(message);
    }

    /// The merged view: `snapshot` in order, then the buffer for `key`.
    pub fn view(&self, key: &ConversationKey, snapshot: &[Message]) -> Vec<Message> {
        let pending = self.pending(key);
        let mut merged = Vec::with_capacity(snapshot.len() + pending.len());
        merged.extend_from_slice(snapshot);
        merged.extend_from_slice(pending);
        merged
    }

    /// Messages buffered under `key`, oldest first.
    pub fn pending(&self, key: &ConversationKey) -> &[Message] {
        self.buffers.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_pending(&self, key: &ConversationKey) -> bool {
        !self.pending(key).is_empty()
    }

    /// Keys with at least one buffered message.
    pub fn keys(&self) -> Vec<ConversationKey> {
        let mut keys: Vec<ConversationKey> = self
            .buffers
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Total buffered messages across all keys.
    pub fn len(&self) -> usize {
        self.buffers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
