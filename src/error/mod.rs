//! Error handling for chatline.
//!
//! | Error | Scope | Effect on a turn |
//! |-------|-------|------------------|
//! | [`AuthError`] | credential missing or rejected | aborts, `on_error` fires |
//! | [`TransportError`] | request or body read failed | aborts, `on_error` fires |
//! | [`DecodeError`] | one malformed `data:` line | line dropped, turn continues |
//! | [`ChatError::SessionBusy`] | a turn is already running for the key | `begin` rejected |
//!
//! Payloads that parse but match no known shape are not errors at all. They
//! are classified as unrecognized and dropped, and are logged at a different
//! level than decode failures.

mod auth;
mod chat_error;
mod result;
mod stream;

pub use auth::AuthError;
pub use chat_error::ChatError;
pub use result::{ChatResult, ResultExt};
pub use stream::{DecodeError, TransportError};
