//! Connector endpoints

use super::models::{Connector, NewConnector, UpdateConnector};
use super::{endpoint, to_body, ApiResult};
use crate::http::HttpClient;
use crate::types::JsonValue;
use serde_json::json;
use tracing::info;

/// `/connectors`
///
/// Connectors are listed per group through
/// [`Groups::connectors`](super::Groups::connectors).
#[derive(Debug, Clone, Copy)]
pub struct Connectors<'a> {
    http: &'a HttpClient,
}

impl<'a> Connectors<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn get(&self, id: &str) -> ApiResult<Connector> {
        self.http.get(&endpoint(&["connectors", id])).await
    }

    pub async fn create(&self, connector: &NewConnector) -> ApiResult<Connector> {
        self.http.post("connectors", to_body(connector)?).await
    }

    pub async fn update(&self, id: &str, update: &UpdateConnector) -> ApiResult<Connector> {
        self.http
            .patch(&endpoint(&["connectors", id]), to_body(update)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.http
            .delete(&endpoint(&["connectors", id]))
            .await
            .map(|_| ())
    }

    /// Trigger a sync
    ///
    /// With `force`, a sync already in progress is cancelled and restarted.
    /// Sent once; a failed trigger is never replayed.
    pub async fn sync(&self, id: &str, force: bool) -> ApiResult<()> {
        let _: JsonValue = self
            .http
            .post(&endpoint(&["connectors", id, "sync"]), json!({ "force": force }))
            .await?;
        info!(connector_id = id, force, "Sync triggered");
        Ok(())
    }

    pub async fn pause(&self, id: &str) -> ApiResult<Connector> {
        self.update(id, &UpdateConnector::paused(true)).await
    }

    pub async fn resume(&self, id: &str) -> ApiResult<Connector> {
        self.update(id, &UpdateConnector::paused(false)).await
    }

    /// Schema, table and column selection, as returned
    pub async fn schemas(&self, id: &str) -> ApiResult<JsonValue> {
        self.http.get(&endpoint(&["connectors", id, "schemas"])).await
    }
}
