//! Inbound webhook module
//!
//! Verifies and parses the callbacks the service posts when syncs start,
//! finish, or connectors change.
//!
//! # Overview
//!
//! - [`compute_signature`] / [`verify`]: HMAC-SHA256 over the raw body
//! - [`WebhookEvent`]: the parsed callback
//! - [`router`] / [`serve`]: an axum receiver wiring the two together

mod event;
mod receiver;
mod signature;

pub use event::{EventType, WebhookEvent};
pub use receiver::{
    rejection_status, router, serve, EventHandler, LoggingHandler, ReceiverConfig,
};
pub use signature::{
    compute_signature, signature_header_name, verify, SignatureError, WebhookSecret,
};
