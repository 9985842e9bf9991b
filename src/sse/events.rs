//! Line and event types produced by the stream decoder and classifier.

use serde_json::Value;

use crate::error::TransportError;

/// A single decoded SSE line, tagged by its field prefix.
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (`event: ...`), ignored by the classifier
    Event(String),
    /// Data payload (`data: ...`) with surrounding whitespace trimmed
    Data(String),
    /// Comment line (starts with ':') or any unknown field
    Comment(String),
    /// Empty line
    Empty,
}

/// A classified unit of meaning from one `data:` line.
///
/// `Error` is never produced from a payload. It is appended by
/// [`classify_stream`](super::classify_stream) when the underlying transport
/// fails, and is always the last record of that stream.
#[derive(Debug, Clone, PartialEq)]
pub enum EventRecord {
    /// The server announced the conversation this turn belongs to
    Lifecycle { conversation_id: String },
    /// A fragment of the assistant reply
    ContentDelta { text: String },
    /// End-of-exchange metadata
    Summary { message_count: u64 },
    /// The transport failed mid-stream
    Error(TransportError),
    /// Parsed JSON that matched no known shape
    Unrecognized(Value),
}

impl EventRecord {
    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            EventRecord::Lifecycle { .. } => "lifecycle",
            EventRecord::ContentDelta { .. } => "content_delta",
            EventRecord::Summary { .. } => "summary",
            EventRecord::Error(_) => "error",
            EventRecord::Unrecognized(_) => "unrecognized",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EventRecord::Error(_))
    }
}
