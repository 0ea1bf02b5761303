// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Fivetran Client
//!
//! A typed async client for the Fivetran REST API.
//!
//! ## Features
//!
//! - **Lazy Pagination**: cursor-paginated listings pulled one page at a time
//! - **Classified Retries**: exponential backoff with jitter for transient failures
//! - **Webhook Verification**: HMAC-SHA256 signatures checked in constant time
//! - **Typed Resources**: groups, connectors, destinations and webhooks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fivetran_client::{Client, Credentials, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(Credentials::new("key", "secret"))?;
//!
//!     // Walk every connector in a group, one page at a time
//!     let mut connectors = client.groups().connectors("projected_sickle");
//!     while let Some(connector) = connectors.next_item().await {
//!         let connector = connector?;
//!         println!("{} {:?}", connector.id, connector.sync_state());
//!     }
//!
//!     client.connectors().sync("icy_indeed", false).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Client                             │
//! │     groups()   connectors()   destinations()   webhooks()   │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────────┬─────────────┴─────────┬─────────────────────┐
//! │     HTTP      │       Pagination      │        Retry        │
//! ├───────────────┼───────────────────────┼─────────────────────┤
//! │ Basic auth    │ Page / ListParams     │ RetryPolicy         │
//! │ Classify      │ Paginator (lazy)      │ Retrier             │
//! │ Rate limit    │ Stream adapter        │ Backoff + jitter    │
//! └───────────────┴───────────────────────┴─────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │   Webhook: compute_signature / verify  →  axum receiver     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document resource model fields before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and classification
pub mod error;

/// Common types and type aliases
pub mod types;

/// API key authentication
pub mod auth;

/// HTTP client with classification, retry and rate limiting
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Retry policy and executor
pub mod retry;

/// Webhook signatures and receiver
pub mod webhook;

/// Typed API resources
pub mod resources;

/// Top-level client
pub mod client;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::Credentials;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClassifiedError, Error, ErrorKind, Result};
pub use pagination::{Page, Paginator};
pub use retry::{Retrier, RetryPolicy};
pub use webhook::{compute_signature, signature_header_name, verify, SignatureError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
