//! Byte-chunk to line decoding.
//!
//! Network chunks arrive at arbitrary boundaries, including in the middle of
//! a multibyte UTF-8 sequence. [`LineDecoder`] carries both the incomplete
//! byte tail and the partial trailing line across calls, so the sequence of
//! lines it produces depends only on the concatenated bytes.

use std::collections::VecDeque;

use futures::stream::{self, Stream, StreamExt};
use tracing::debug;

use crate::error::TransportError;
use crate::traits::ByteStream;

/// Incremental decoder from byte chunks to complete text lines.
///
/// Lines are split on `\n`. A trailing `\r` is removed and lines that are
/// empty or whitespace-only are never emitted. Invalid UTF-8 is replaced with
/// U+FFFD.
#[derive(Debug, Default, Clone)]
pub struct LineDecoder {
    /// Bytes of an incomplete UTF-8 sequence at the end of the last chunk
    utf8_tail: Vec<u8>,
    /// Text after the last newline seen so far
    pending: String,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return every line it completed, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.decode_utf8(chunk, false);
        self.pending.push_str(&text);
        self.drain_lines()
    }

    /// Flush the decoder at end of stream.
    ///
    /// Returns the unterminated trailing line, if it has any content.
    pub fn finish(&mut self) -> Option<String> {
        let text = self.decode_utf8(&[], true);
        self.pending.push_str(&text);
        let rest = std::mem::take(&mut self.pending);
        normalize_line(&rest)
    }

    /// The unterminated text held so far.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    fn decode_utf8(&mut self, chunk: &[u8], flush: bool) -> String {
        let mut bytes = std::mem::take(&mut self.utf8_tail);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        // Incomplete sequence at the end of input
                        None => {
                            if flush {
                                out.push(char::REPLACEMENT_CHARACTER);
                            } else {
                                self.utf8_tail = after.to_vec();
                            }
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    fn drain_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.pending.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        complete.split('\n').filter_map(normalize_line).collect()
    }
}

fn normalize_line(line: &str) -> Option<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

struct DecodeState {
    body: ByteStream,
    decoder: LineDecoder,
    ready: VecDeque<String>,
    finished: bool,
}

/// Turn a response body into a stream of complete lines.
///
/// The stream ends when the body ends, after flushing any unterminated final
/// line. If the body fails, one `Err` is yielded and nothing after it; the
/// partial line held at that point is discarded.
pub fn decode_lines(body: ByteStream) -> impl Stream<Item = Result<String, TransportError>> + Send {
    let state = DecodeState {
        body,
        decoder: LineDecoder::new(),
        ready: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(line) = state.ready.pop_front() {
                return Some((Ok(line), state));
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let lines = state.decoder.feed(&chunk);
                    state.ready.extend(lines);
                }
                Some(Err(e)) => {
                    debug!(error = %e, "Response body read failed");
                    state.finished = true;
                    return Some((Err(TransportError::from(e)), state));
                }
                None => {
                    state.finished = true;
                    if let Some(line) = state.decoder.finish() {
                        state.ready.push_back(line);
                    }
                }
            }
        }
    })
}
