//! One active turn per conversation.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::cache::ConversationKey;
use crate::error::{ChatError, ChatResult};

/// Registry of conversation keys with a turn in flight.
///
/// Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct ActiveTurns {
    keys: Arc<Mutex<HashSet<ConversationKey>>>,
}

impl ActiveTurns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`, or fail with [`ChatError::SessionBusy`] if it is held.
    ///
    /// The claim is released when the returned guard is dropped.
    pub fn try_acquire(&self, key: &ConversationKey) -> ChatResult<TurnGuard> {
        let mut keys = self.lock();
        if !keys.insert(key.clone()) {
            debug!(key = %key, "Turn already active");
            return Err(ChatError::SessionBusy {
                key: key.to_string(),
            });
        }
        Ok(TurnGuard {
            keys: Arc::clone(&self.keys),
            key: key.clone(),
        })
    }

    pub fn is_active(&self, key: &ConversationKey) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<ConversationKey>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof that a turn holds its conversation key.
#[derive(Debug)]
pub struct TurnGuard {
    keys: Arc<Mutex<HashSet<ConversationKey>>>,
    key: ConversationKey,
}

impl TurnGuard {
    pub fn key(&self) -> &ConversationKey {
        &self.key
    }
}

impl Drop for TurnGuard {
    fn drop(&mut self) {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        keys.remove(&self.key);
    }
}
