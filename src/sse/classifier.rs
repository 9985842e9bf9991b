//! Classification of decoded lines into [`EventRecord`]s.
//!
//! Only `data:` lines carry meaning. Their payload is parsed as JSON and
//! matched against three shapes, checked in this order:
//!
//! 1. a `message_count` key: end-of-exchange summary
//! 2. `type == "text_delta"` with non-empty `text`: a reply fragment
//! 3. a non-empty `conversation_id` and none of `type`, `text`,
//!    `message_count`: the conversation announcement
//!
//! Anything else that parses is [`EventRecord::Unrecognized`].

use futures::future;
use futures::stream::{Stream, StreamExt};
use serde_json::Value;
use tracing::{trace, warn};

use super::events::{EventRecord, SseLine};
use crate::error::{DecodeError, TransportError};

const DATA_PREFIX: &str = "data:";
const EVENT_PREFIX: &str = "event:";

/// Split one line into its SSE field.
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.trim().is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
        return SseLine::Data(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix(EVENT_PREFIX) {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix(':') {
        return SseLine::Comment(rest.trim().to_string());
    }

    SseLine::Comment(line.to_string())
}

/// Classify an already-parsed payload.
pub fn classify_payload(payload: &Value) -> EventRecord {
    let Some(object) = payload.as_object() else {
        return EventRecord::Unrecognized(payload.clone());
    };

    if let Some(count) = object.get("message_count") {
        return match message_count_of(count) {
            Some(message_count) => EventRecord::Summary { message_count },
            None => EventRecord::Unrecognized(payload.clone()),
        };
    }

    if object.get("type").and_then(Value::as_str) == Some("text_delta") {
        if let Some(text) = object.get("text").and_then(Value::as_str) {
            if !text.is_empty() {
                return EventRecord::ContentDelta {
                    text: text.to_string(),
                };
            }
        }
    }

    let announces_only = !object.contains_key("type") && !object.contains_key("text");
    if announces_only {
        if let Some(conversation_id) = object.get("conversation_id").and_then(conversation_id_of) {
            return EventRecord::Lifecycle { conversation_id };
        }
    }

    EventRecord::Unrecognized(payload.clone())
}

/// A count serialized as `2` or `2.0`. Fractional, negative, and non-numeric
/// values are not counts.
fn message_count_of(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    let count = value.as_f64()?;
    (count >= 0.0 && count.fract() == 0.0 && count <= u64::MAX as f64).then(|| count as u64)
}

fn conversation_id_of(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Parse the text after `data:` and classify it.
pub fn parse_data_payload(data: &str) -> Result<EventRecord, DecodeError> {
    serde_json::from_str::<Value>(data)
        .map(|payload| classify_payload(&payload))
        .map_err(|e| DecodeError::new(data, e.to_string()))
}

/// Classify one decoded line.
///
/// Returns `None` for lines that carry no record: non-`data:` fields and
/// `data:` lines whose payload fails to parse. Parse failures are logged and
/// never stop the stream.
pub fn classify_line(line: &str) -> Option<EventRecord> {
    let SseLine::Data(data) = parse_sse_line(line) else {
        return None;
    };

    match parse_data_payload(&data) {
        Ok(record) => {
            if let EventRecord::Unrecognized(ref payload) = record {
                trace!(payload = %payload, "Unrecognized stream payload");
            }
            Some(record)
        }
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "Dropping malformed data line");
            None
        }
    }
}

/// Classify a stream of decoded lines.
///
/// A transport failure becomes a final [`EventRecord::Error`].
pub fn classify_stream<S>(lines: S) -> impl Stream<Item = EventRecord> + Send
where
    S: Stream<Item = Result<String, TransportError>> + Send,
{
    lines.filter_map(|line| {
        future::ready(match line {
            Ok(line) => classify_line(&line),
            Err(e) => Some(EventRecord::Error(e)),
        })
    })
}
