//! Pagination module
//!
//! Cursor-based pagination over list endpoints.
//!
//! # Overview
//!
//! A list endpoint returns one [`Page`] per call together with an opaque
//! cursor for the next one. [`Paginator`] turns a "fetch page for cursor"
//! function into a lazy sequence of items. It never retries; wrap the
//! fetch function with [`crate::retry::Retrier`] for that.

mod paginator;
mod types;

pub use paginator::{BoxPaginator, PageFetcher, PageFuture, Paginator};
pub use types::{ListParams, Page};

#[cfg(test)]
mod tests;
