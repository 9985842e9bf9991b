//! Streaming reply decoding.
//!
//! The reply body of `POST /chat/stream` is SSE-framed:
//! - `data: <json>` - a payload line, the only kind that carries meaning
//! - `event: <name>` - event name, ignored
//! - Lines starting with `:` - comments, ignored
//! - Empty lines - separators, never emitted
//!
//! # Module structure
//! - `decoder` - byte chunks to complete lines ([`LineDecoder`], [`decode_lines`])
//! - `classifier` - lines to [`EventRecord`]s ([`classify_line`], [`classify_stream`])
//! - `events` - the line and record types

mod classifier;
mod decoder;
mod events;

pub use classifier::{
    classify_line, classify_payload, classify_stream, parse_data_payload, parse_sse_line,
};
pub use decoder::{decode_lines, LineDecoder};
pub use events::{EventRecord, SseLine};

use futures::Stream;

use crate::traits::ByteStream;

/// Decode and classify a response body in one step.
pub fn event_stream(body: ByteStream) -> impl Stream<Item = EventRecord> + Send {
    classify_stream(decode_lines(body))
}
