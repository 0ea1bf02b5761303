//! Webhook event payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event names sent by the webhook service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SyncStart,
    SyncEnd,
    Status,
    DbtRunStart,
    DbtRunSucceeded,
    DbtRunFailed,
    TransformationRunStart,
    TransformationRunSucceeded,
    TransformationRunFailed,
    ConnectionSuccessful,
    ConnectionFailure,
    CreateConnector,
    PauseConnector,
    ResumeConnector,
    EditConnector,
    DeleteConnector,
    ForceUpdateConnector,
    ResyncConnector,
    ResyncTable,
    /// Anything this crate does not know about yet
    #[serde(other)]
    Other,
}

/// A parsed webhook callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// What happened
    pub event: EventType,
    /// When the event was emitted
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Source type of the connector, e.g. "postgres"
    #[serde(default)]
    pub connector_type: Option<String>,
    #[serde(default)]
    pub connector_id: Option<String>,
    /// Destination group the connector belongs to
    #[serde(default, alias = "destination_group_id")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub sync_id: Option<String>,
    /// Event-specific body
    #[serde(default)]
    pub data: Value,
}

impl WebhookEvent {
    /// Parse an event from a verified request body
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// `data.status`, when the event carries one
    pub fn status(&self) -> Option<&str> {
        self.data.get("status").and_then(Value::as_str)
    }

    /// Check if this is a `sync_end` reporting success
    pub fn is_successful_sync(&self) -> bool {
        self.event == EventType::SyncEnd && self.status() == Some("SUCCESSFUL")
    }
}
