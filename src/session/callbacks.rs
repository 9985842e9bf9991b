//! Turn notifications.
//!
//! A [`TurnSession`](super::TurnSession) reports progress through
//! [`TurnCallbacks`]. Every method has a no-op default, so implementors only
//! override what they render.

use tokio::sync::mpsc;

use crate::error::ChatError;

/// Receiver of turn progress.
pub trait TurnCallbacks {
    /// The server announced the conversation id. Fires at most once per turn.
    fn on_start(&mut self, _conversation_id: &str) {}

    /// One reply fragment, in arrival order.
    fn on_content(&mut self, _text: &str) {}

    /// End-of-exchange metadata.
    fn on_summary(&mut self, _message_count: u64) {}

    /// The reply finished and its conversation id is known.
    fn on_complete(&mut self, _conversation_id: &str) {}

    /// Never fired by the session; available to callers that drive their own
    /// end-of-interaction signal.
    fn on_done(&mut self, _conversation_id: &str) {}

    /// The turn aborted.
    fn on_error(&mut self, _error: &ChatError) {}
}

/// Callbacks that ignore everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCallbacks;

impl TurnCallbacks for NoopCallbacks {}

/// One callback invocation as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnUpdate {
    Started { conversation_id: String },
    Content { text: String },
    Summary { message_count: u64 },
    Completed { conversation_id: String },
    Done { conversation_id: String },
    Failed(ChatError),
}

/// Forwards callbacks over an unbounded channel.
///
/// Sends to a closed receiver are dropped; the turn keeps running.
#[derive(Debug, Clone)]
pub struct ChannelCallbacks {
    tx: mpsc::UnboundedSender<TurnUpdate>,
}

impl ChannelCallbacks {
    pub fn new(tx: mpsc::UnboundedSender<TurnUpdate>) -> Self {
        Self { tx }
    }

    /// Create callbacks together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TurnUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, update: TurnUpdate) {
        let _ = self.tx.send(update);
    }
}

impl TurnCallbacks for ChannelCallbacks {
    fn on_start(&mut self, conversation_id: &str) {
        self.send(TurnUpdate::Started {
            conversation_id: conversation_id.to_string(),
        });
    }

    fn on_content(&mut self, text: &str) {
        self.send(TurnUpdate::Content {
            text: text.to_string(),
        });
    }

    fn on_summary(&mut self, message_count: u64) {
        self.send(TurnUpdate::Summary { message_count });
    }

    fn on_complete(&mut self, conversation_id: &str) {
        self.send(TurnUpdate::Completed {
            conversation_id: conversation_id.to_string(),
        });
    }

    fn on_done(&mut self, conversation_id: &str) {
        self.send(TurnUpdate::Done {
            conversation_id: conversation_id.to_string(),
        });
    }

    fn on_error(&mut self, error: &ChatError) {
        self.send(TurnUpdate::Failed(error.clone()));
    }
}

/// Records every callback in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingCallbacks {
    pub updates: Vec<TurnUpdate>,
}

impl RecordingCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenation of every `on_content` fragment.
    pub fn content(&self) -> String {
        self.updates
            .iter()
            .filter_map(|u| match u {
                TurnUpdate::Content { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&TurnUpdate) -> bool) -> usize {
        self.updates.iter().filter(|u| matches(u)).count()
    }

    pub fn errors(&self) -> Vec<&ChatError> {
        self.updates
            .iter()
            .filter_map(|u| match u {
                TurnUpdate::Failed(err) => Some(err),
                _ => None,
            })
            .collect()
    }
}

impl TurnCallbacks for RecordingCallbacks {
    fn on_start(&mut self, conversation_id: &str) {
        self.updates.push(TurnUpdate::Started {
            conversation_id: conversation_id.to_string(),
        });
    }

    fn on_content(&mut self, text: &str) {
        self.updates.push(TurnUpdate::Content {
            text: text.to_string(),
        });
    }

    fn on_summary(&mut self, message_count: u64) {
        self.updates.push(TurnUpdate::Summary { message_count });
    }

    fn on_complete(&mut self, conversation_id: &str) {
        self.updates.push(TurnUpdate::Completed {
            conversation_id: conversation_id.to_string(),
        });
    }

    fn on_done(&mut self, conversation_id: &str) {
        self.updates.push(TurnUpdate::Done {
            conversation_id: conversation_id.to_string(),
        });
    }

    fn on_error(&mut self, error: &ChatError) {
        self.updates.push(TurnUpdate::Failed(error.clone()));
    }
}
