//! HTTP client module
//!
//! Provides the authenticated transport the resource endpoints are built on.
//!
//! # Features
//!
//! - **Classified Errors**: every failure maps onto an [`ErrorKind`](crate::error::ErrorKind)
//! - **Automatic Retries**: idempotent requests go through a [`Retrier`](crate::retry::Retrier)
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Pagination**: list endpoints are exposed as lazy paginators

mod classify;
mod client;
mod rate_limit;

pub use classify::{classify_response, classify_transport, parse_retry_after, Envelope};
pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_BASE_URL,
    DEFAULT_PAGE_SIZE,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
