//! Resource models
//!
//! Response models keep fields they do not name in `extra` so nothing the
//! API adds is lost on a round trip.

use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Groups
// ============================================================================

/// A group of connectors sharing one destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Body for creating a group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGroup {
    pub name: String,
}

impl NewGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Body for updating a group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ============================================================================
// Connectors
// ============================================================================

/// Sync and setup state of a connector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorStatus {
    #[serde(default)]
    pub setup_state: Option<String>,
    #[serde(default)]
    pub sync_state: Option<String>,
    #[serde(default)]
    pub update_state: Option<String>,
    #[serde(default)]
    pub is_historical_sync: Option<bool>,
    #[serde(default)]
    pub tasks: Vec<JsonValue>,
    #[serde(default)]
    pub warnings: Vec<JsonValue>,
}

/// A connector syncing one source into a group's destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub group_id: String,
    pub service: String,
    /// Destination schema name
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub paused: Option<bool>,
    /// Minutes between syncs
    #[serde(default)]
    pub sync_frequency: Option<u32>,
    #[serde(default)]
    pub schedule_type: Option<String>,
    #[serde(default)]
    pub status: Option<ConnectorStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub succeeded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub config: Option<JsonValue>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Connector {
    /// Whether the connector is currently paused
    pub fn is_paused(&self) -> bool {
        self.paused.unwrap_or(false)
    }

    /// Current sync state, e.g. "scheduled" or "syncing"
    pub fn sync_state(&self) -> Option<&str> {
        self.status.as_ref()?.sync_state.as_deref()
    }
}

/// Body for creating a connector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewConnector {
    pub service: String,
    pub group_id: String,
    pub config: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_frequency: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_setup_tests: Option<bool>,
}

impl NewConnector {
    pub fn new(service: impl Into<String>, group_id: impl Into<String>, config: JsonValue) -> Self {
        Self {
            service: service.into(),
            group_id: group_id.into(),
            config,
            paused: None,
            sync_frequency: None,
            run_setup_tests: None,
        }
    }
}

/// Body for updating a connector; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateConnector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_frequency: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonValue>,
}

impl UpdateConnector {
    /// Update that only flips the paused flag
    pub fn paused(paused: bool) -> Self {
        Self {
            paused: Some(paused),
            ..Default::default()
        }
    }
}

// ============================================================================
// Destinations
// ============================================================================

/// A warehouse a group loads into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub group_id: String,
    pub service: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub time_zone_offset: Option<String>,
    #[serde(default)]
    pub setup_status: Option<String>,
    #[serde(default)]
    pub config: Option<JsonValue>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Body for creating a destination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDestination {
    pub group_id: String,
    pub service: String,
    pub config: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_setup_tests: Option<bool>,
}

impl NewDestination {
    pub fn new(group_id: impl Into<String>, service: impl Into<String>, config: JsonValue) -> Self {
        Self {
            group_id: group_id.into(),
            service: service.into(),
            config,
            region: None,
            time_zone_offset: None,
            run_setup_tests: None,
        }
    }
}

/// Body for updating a destination
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_setup_tests: Option<bool>,
}

// ============================================================================
// Webhooks
// ============================================================================

/// Scope of a webhook subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookScope {
    /// Fires for every connector in the account
    Account,
    /// Fires for connectors in one group
    Group,
}

/// A registered webhook subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    #[serde(rename = "type")]
    pub scope: WebhookScope,
    pub url: String,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Body for creating a webhook
#[derive(Clone, PartialEq, Serialize)]
pub struct NewWebhook {
    pub url: String,
    pub events: Vec<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl NewWebhook {
    pub fn new(url: impl Into<String>, events: Vec<String>) -> Self {
        Self {
            url: url.into(),
            events,
            active: true,
            secret: None,
        }
    }

    /// Sign deliveries with `secret`
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

impl std::fmt::Debug for NewWebhook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewWebhook")
            .field("url", &self.url)
            .field("events", &self.events)
            .field("active", &self.active)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Body for updating a webhook
#[derive(Clone, Default, PartialEq, Serialize)]
pub struct UpdateWebhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl std::fmt::Debug for UpdateWebhook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateWebhook")
            .field("url", &self.url)
            .field("events", &self.events)
            .field("active", &self.active)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Outcome of a test delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookTestResult {
    pub succeed: bool,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}
