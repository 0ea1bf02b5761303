//! Typed API resources
//!
//! Each resource is a borrowed view over the shared [`HttpClient`]; list
//! endpoints return lazy paginators that own a clone of the client.
//!
//! | Resource | Path |
//! |----------|------|
//! | [`Groups`] | `/groups` |
//! | [`Connectors`] | `/connectors` |
//! | [`Destinations`] | `/destinations` |
//! | [`Webhooks`] | `/webhooks` |

mod connectors;
mod destinations;
mod groups;
mod models;
mod webhooks;

pub use connectors::Connectors;
pub use destinations::Destinations;
pub use groups::Groups;
pub use webhooks::Webhooks;
pub use models::{
    Connector, ConnectorStatus, Destination, Group, NewConnector, NewDestination, NewGroup,
    NewWebhook, UpdateConnector, UpdateDestination, UpdateGroup, UpdateWebhook, Webhook,
    WebhookScope, WebhookTestResult,
};

use crate::error::ClassifiedError;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Result of an API call
pub type ApiResult<T> = std::result::Result<T, ClassifiedError>;

/// Join path segments, percent-encoding each one
///
/// An id holding `/`, `?` or `#` stays a single segment instead of
/// changing the request path or query.
fn endpoint(segments: &[&str]) -> String {
    let mut url = Url::parse("http://localhost/").expect("static URL is valid");
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Serialize a request body
fn to_body<B: Serialize>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body)
        .map_err(|e| ClassifiedError::transport(format!("Failed to encode request body: {e}")))
}

#[cfg(test)]
mod tests;
