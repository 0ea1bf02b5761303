//! Webhook subscription endpoints

use super::models::{NewWebhook, UpdateWebhook, Webhook, WebhookTestResult};
use super::{endpoint, to_body, ApiResult};
use crate::http::HttpClient;
use crate::pagination::BoxPaginator;
use serde_json::json;

/// `/webhooks`
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a> {
    http: &'a HttpClient,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub fn list(&self) -> BoxPaginator<Webhook> {
        self.http.paginate("webhooks")
    }

    pub async fn get(&self, id: &str) -> ApiResult<Webhook> {
        self.http.get(&endpoint(&["webhooks", id])).await
    }

    /// Subscribe to events from every connector in the account
    pub async fn create_account(&self, webhook: &NewWebhook) -> ApiResult<Webhook> {
        self.http.post("webhooks/account", to_body(webhook)?).await
    }

    /// Subscribe to events from connectors in one group
    pub async fn create_group(&self, group_id: &str, webhook: &NewWebhook) -> ApiResult<Webhook> {
        self.http
            .post(&endpoint(&["webhooks", "group", group_id]), to_body(webhook)?)
            .await
    }

    pub async fn update(&self, id: &str, update: &UpdateWebhook) -> ApiResult<Webhook> {
        self.http
            .patch(&endpoint(&["webhooks", id]), to_body(update)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.http.delete(&endpoint(&["webhooks", id])).await.map(|_| ())
    }

    /// Ask the service to send a test delivery of `event`
    pub async fn test(&self, id: &str, event: &str) -> ApiResult<WebhookTestResult> {
        self.http
            .post(&endpoint(&["webhooks", id, "test"]), json!({ "event": event }))
            .await
    }
}
