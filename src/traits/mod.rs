//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - GET and streaming POST
//! - [`CredentialsProvider`] - bearer token and user id lookup

pub mod credentials;
pub mod http;

pub use credentials::{CredentialsError, CredentialsProvider};
pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
