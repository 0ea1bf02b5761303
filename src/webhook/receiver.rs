//! HTTP receiver for webhook callbacks
//!
//! Takes the raw body before any parsing, verifies its signature, parses
//! the event and hands it to an [`EventHandler`].
//!
//! | Outcome                         | Status |
//! |---------------------------------|--------|
//! | signature header missing/empty  | 400    |
//! | signature mismatch              | 401    |
//! | body is not a valid event       | 422    |
//! | handler returned an error       | 500    |
//! | accepted                        | 200    |

use super::event::WebhookEvent;
use super::signature::{signature_header_name, SignatureError, WebhookSecret};
use crate::error::{Error, Result};
use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application code that consumes verified events
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Process one event; an error turns into a 500 for the sender
    async fn handle(&self, event: WebhookEvent) -> anyhow::Result<()>;
}

/// Handler that only logs events
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

#[async_trait]
impl EventHandler for LoggingHandler {
    async fn handle(&self, event: WebhookEvent) -> anyhow::Result<()> {
        tracing::info!(
            event = ?event.event,
            connector_id = event.connector_id.as_deref().unwrap_or("-"),
            group_id = event.group_id.as_deref().unwrap_or("-"),
            "Webhook event received"
        );
        Ok(())
    }
}

/// Receiver configuration
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    /// Route the callbacks are posted to
    pub path: String,
    /// Secret configured on the webhook
    pub secret: WebhookSecret,
}

impl ReceiverConfig {
    /// Default route for callbacks
    pub const DEFAULT_PATH: &'static str = "/webhooks";

    /// Create a config on the default path
    pub fn new(secret: impl Into<WebhookSecret>) -> Self {
        Self {
            path: Self::DEFAULT_PATH.to_string(),
            secret: secret.into(),
        }
    }

    /// Set the route path; a missing leading `/` is added
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = route_path(path.into());
        self
    }
}

/// State shared across handlers
#[derive(Clone)]
struct ReceiverState {
    secret: WebhookSecret,
    handler: Arc<dyn EventHandler>,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
        }
    }
}

/// Status code used to reject a callback that failed verification
pub fn rejection_status(err: SignatureError) -> StatusCode {
    match err {
        SignatureError::MissingSignature => StatusCode::BAD_REQUEST,
        SignatureError::InvalidSignature => StatusCode::UNAUTHORIZED,
    }
}

/// axum panics on routes without a leading `/`
fn route_path(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

/// Build the receiver router
pub fn router(config: ReceiverConfig, handler: Arc<dyn EventHandler>) -> Router {
    let state = ReceiverState {
        secret: config.secret,
        handler,
    };

    Router::new()
        .route("/health", get(health))
        .route(&route_path(config.path), post(receive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve the receiver until the process stops
pub async fn serve(config: ReceiverConfig, handler: Arc<dyn EventHandler>, port: u16) -> Result<()> {
    let path = route_path(config.path.clone());
    let app = router(config, handler);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening for webhooks on http://{}{}", addr, path);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Other(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Callback endpoint
async fn receive(
    State(state): State<Arc<ReceiverState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = match headers.get(signature_header_name()) {
        Some(value) => match value.to_str() {
            Ok(s) => Some(s),
            Err(_) => return reject(SignatureError::InvalidSignature),
        },
        None => None,
    };

    if let Err(e) = state.secret.verify(&body, signature) {
        return reject(e);
    }

    let event = match WebhookEvent::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Webhook payload could not be parsed: {}", e);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(format!("Invalid payload: {e}"))),
            )
                .into_response();
        }
    };

    tracing::debug!(event = ?event.event, "Webhook verified");

    match state.handler.handle(event).await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok())).into_response(),
        Err(e) => {
            tracing::error!("Webhook handler failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Handler failed")),
            )
                .into_response()
        }
    }
}

fn reject(err: SignatureError) -> Response {
    tracing::warn!("Rejected webhook: {}", err);
    (rejection_status(err), Json(ApiResponse::error(err.to_string()))).into_response()
}
