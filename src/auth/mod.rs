//! Credentials consumed by the core.
//!
//! Signing in is owned by the Auth Service. The core only reads the bearer
//! token and user id that a sign-in left behind.

pub mod credentials;

pub use credentials::{Credentials, CredentialsStore};
