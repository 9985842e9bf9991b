//! chatline - streaming chat ingestion and reconciliation
//!
//! Sends a user message to a chat server, decodes the SSE reply as it
//! arrives, and keeps locally produced messages visible until the stored
//! history catches up.

pub mod adapters;
pub mod auth;
pub mod cache;
pub mod chat;
pub mod cli;
pub mod config;
pub mod conversations;
pub mod error;
pub mod models;
pub mod prelude;
pub mod session;
pub mod sse;
pub mod traits;
