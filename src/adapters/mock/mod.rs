//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with scripted responses and streams
//! - [`InMemoryCredentials`] - in-memory credential storage

pub mod credentials;
pub mod http;

pub use credentials::InMemoryCredentials;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
