//! Authentication module
//!
//! The API authenticates every request with HTTP Basic auth built from an
//! API key and secret pair.

mod credentials;

pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
