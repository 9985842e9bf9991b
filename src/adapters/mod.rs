//! Concrete implementations of the traits in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileCredentialsProvider`] - credentials file in the home directory
//! - [`EnvCredentialsProvider`] - `CHATLINE_TOKEN` / `CHATLINE_USER_ID`
//! - [`mock`] - test doubles for both

pub mod env_credentials;
pub mod file_credentials;
pub mod mock;
pub mod reqwest_http;

pub use env_credentials::EnvCredentialsProvider;
pub use file_credentials::FileCredentialsProvider;
pub use mock::{InMemoryCredentials, MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
