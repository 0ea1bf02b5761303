//! Retry module
//!
//! Exponential backoff for operations that fail with a
//! [`ClassifiedError`](crate::error::ClassifiedError).
//!
//! # Delay schedule
//!
//! - Rate limited with a positive `retry-after`: that many seconds, capped
//! - Otherwise: `base_delay * 2^(attempt - 1)`, capped at `max_delay`
//! - With jitter: plus up to a quarter of the capped delay

mod policy;
mod retrier;

pub use policy::{add_jitter, RetryObserver, RetryPolicy, RetryPolicyBuilder, RetryPredicate};
pub use retrier::{retry, Retrier};
