//! Buffer retirement and re-keying for MessageReconciler

use tracing::debug;

use super::{ConversationKey, MessageReconciler};

impl MessageReconciler {
    /// Drop every message buffered under `key`. Returns how many were dropped.
    ///
    /// Call this only once a fetched snapshot is known to contain the
    /// buffered messages. Nothing is verified here; retiring early makes
    /// messages disappear from the view until the next fetch.
    pub fn retire(&mut self, key: &ConversationKey) -> usize {
        let retired = self.buffers.remove(key).map(|m| m.len()).unwrap_or(0);
        if retired > 0 {
            debug!(key = %key, retired, "Retired local messages");
        }
        retired
    }

    /// Move the buffer under `from` to `to`. Returns how many moved.
    ///
    /// Moved messages are placed before anything already buffered under
    /// `to`, since they were produced first.
    pub fn rekey(&mut self, from: &ConversationKey, to: ConversationKey) -> usize {
        if *from == to {
            return 0;
        }
        let Some(mut moved) = self.buffers.remove(from) else {
            return 0;
        };
        let count = moved.len();

        let target = self.buffers.entry(to.clone()).or_default();
        moved.append(target);
        *target = moved;

        debug!(from = %from, to = %to, count, "Re-keyed local messages");
        count
    }
}
