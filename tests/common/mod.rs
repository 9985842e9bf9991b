//! Common test utilities for integration tests.
//!
//! ```ignore
//! mod common;
//! use common::*;
//!
//! let mock = stream_mock(&["data: {\"conversation_id\":\"c1\"}\n"]);
//! let client = chat_client(&mock, test_credentials());
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use chatline::auth::Credentials;
use chatline::chat::ChatClient;
use chatline::config::ClientConfig;
use chatline::session::TurnSession;

pub const TEST_TOKEN: &str = "test-access-token-12345";
pub const TEST_USER: &str = "test-user-id";

/// Credentials that pass every local check.
pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_TOKEN, TEST_USER)
}

/// Credentials with no token (not signed in).
pub fn empty_credentials() -> Credentials {
    Credentials::default()
}

/// Config pointing at the default local server, which mocks match on.
pub fn test_config() -> ClientConfig {
    ClientConfig::default()
}

/// URL the turn session posts to under [`test_config`].
pub fn stream_url() -> String {
    test_config().stream_url()
}

/// A turn session over `mock`.
pub fn turn_session(mock: &MockHttpClient, credentials: Option<Credentials>) -> TurnSession {
    TurnSession::new(Arc::new(mock.clone()), &test_config(), credentials)
}

/// A chat client over `mock` with fixed credentials.
pub fn chat_client(mock: &MockHttpClient, credentials: Credentials) -> ChatClient {
    ChatClient::new(
        Arc::new(mock.clone()),
        Arc::new(InMemoryCredentials::with_credentials(credentials)),
        test_config(),
    )
}
