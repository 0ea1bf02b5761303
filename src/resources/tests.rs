//! Tests for the resource endpoints

use super::*;
use crate::auth::Credentials;
use crate::client::Client;
use crate::error::ErrorKind;
use crate::http::HttpClientConfig;
use crate::retry::RetryPolicy;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    let retry = RetryPolicy::builder()
        .base_delay(Duration::from_millis(5))
        .max_delay(Duration::from_millis(20))
        .jitter(false)
        .build()
        .unwrap();
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/v1", server.uri()))
        .retry(retry)
        .build();
    Client::with_config(config, Credentials::new("key", "secret")).unwrap()
}

fn success(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": "Success", "data": data}))
}

fn connector_json(id: &str, paused: bool) -> serde_json::Value {
    json!({
        "id": id,
        "group_id": "projected_sickle",
        "service": "postgres",
        "schema": "pg_public",
        "paused": paused,
        "sync_frequency": 360,
        "status": {
            "setup_state": "connected",
            "sync_state": "scheduled",
            "update_state": "on_schedule",
            "is_historical_sync": false,
            "tasks": [],
            "warnings": []
        },
        "succeeded_at": "2024-03-08T10:15:30.123Z",
        "service_version": 1
    })
}

// ============================================================================
// Model Tests
// ============================================================================

#[test]
fn test_connector_model_keeps_unknown_fields() {
    let connector: Connector = serde_json::from_value(connector_json("c1", false)).unwrap();
    assert_eq!(connector.id, "c1");
    assert_eq!(connector.sync_state(), Some("scheduled"));
    assert!(!connector.is_paused());
    assert!(connector.succeeded_at.is_some());
    assert_eq!(connector.extra.get("service_version"), Some(&json!(1)));
}

#[test]
fn test_webhook_model_scope() {
    let webhook: Webhook = serde_json::from_value(json!({
        "id": "program_quoth",
        "type": "group",
        "group_id": "projected_sickle",
        "url": "https://example.com/hooks",
        "events": ["sync_start", "sync_end"],
        "active": true,
        "secret": "******"
    }))
    .unwrap();

    assert_eq!(webhook.scope, WebhookScope::Group);
    assert_eq!(webhook.events.len(), 2);
    assert_eq!(webhook.extra.get("secret"), Some(&json!("******")));
}

#[test]
fn test_update_bodies_skip_unset_fields() {
    let body = serde_json::to_value(UpdateConnector::paused(true)).unwrap();
    assert_eq!(body, json!({"paused": true}));

    let body = serde_json::to_value(UpdateWebhook::default()).unwrap();
    assert_eq!(body, json!({}));
}

#[test]
fn test_new_webhook_debug_redacts_secret() {
    let webhook = NewWebhook::new("https://example.com", vec!["sync_end".into()]).secret("s3cr3t");
    let debug = format!("{webhook:?}");
    assert!(!debug.contains("s3cr3t"));
}

#[test]
fn test_endpoint_encodes_each_segment() {
    assert_eq!(endpoint(&["groups", "g1"]), "groups/g1");
    assert_eq!(endpoint(&["groups", "g1", "connectors"]), "groups/g1/connectors");
    assert_eq!(endpoint(&["connectors", "a/b"]), "connectors/a%2Fb");
    assert_eq!(endpoint(&["connectors", "x?limit=1"]), "connectors/x%3Flimit=1");
    assert_eq!(endpoint(&["connectors", "id#frag"]), "connectors/id%23frag");
}

// ============================================================================
// Group Tests
// ============================================================================

#[tokio::test]
async fn test_groups_list_paginates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/groups"))
        .and(query_param_is_missing("cursor"))
        .and(query_param("limit", "100"))
        .respond_with(success(json!({
            "items": [{"id": "g1", "name": "Warehouse"}],
            "next_cursor": "eyJza2lwIjoxfQ"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/groups"))
        .and(query_param("cursor", "eyJza2lwIjoxfQ"))
        .respond_with(success(json!({
            "items": [{"id": "g2", "name": "Lake", "created_at": "2024-01-01T00:00:00Z"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let groups = client.groups().list().collect_all().await.unwrap();

    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Warehouse", "Lake"]);
    assert!(groups[1].created_at.is_some());
}

#[tokio::test]
async fn test_group_connectors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/groups/g1/connectors"))
        .respond_with(success(json!({
            "items": [connector_json("c1", false), connector_json("c2", true)]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let connectors = client
        .groups()
        .connectors("g1")
        .collect_all()
        .await
        .unwrap();

    assert_eq!(connectors.len(), 2);
    assert!(connectors[1].is_paused());
}

#[tokio::test]
async fn test_group_create_update_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/groups"))
        .and(body_json(json!({"name": "New"})))
        .respond_with(success(json!({"id": "g9", "name": "New"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/groups/g9"))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(success(json!({"id": "g9", "name": "Renamed"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/groups/g9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Success",
            "message": "Group with id 'g9' has been deleted"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let groups = client.groups();

    let created = groups.create(&NewGroup::new("New")).await.unwrap();
    assert_eq!(created.id, "g9");

    let update = UpdateGroup {
        name: Some("Renamed".into()),
    };
    let updated = groups.update("g9", &update).await.unwrap();
    assert_eq!(updated.name, "Renamed");

    groups.delete("g9").await.unwrap();
}

// ============================================================================
// Connector Tests
// ============================================================================

#[tokio::test]
async fn test_connector_get_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/connectors/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "NotFound_Connector",
            "message": "Connector with id 'missing' doesn't exist"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.connectors().get("missing").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_connector_sync_sends_force_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/connectors/c1/sync"))
        .and(body_json(json!({"force": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Success",
            "message": "Sync has been successfully triggered for connector with id 'c1'"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.connectors().sync("c1", true).await.unwrap();
}

#[tokio::test]
async fn test_connector_sync_failure_not_replayed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/connectors/c1/sync"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.connectors().sync("c1", false).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerError);
}

#[tokio::test]
async fn test_connector_pause_and_resume() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/connectors/c1"))
        .and(body_json(json!({"paused": true})))
        .respond_with(success(connector_json("c1", true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/connectors/c1"))
        .and(body_json(json!({"paused": false})))
        .respond_with(success(connector_json("c1", false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.connectors().pause("c1").await.unwrap().is_paused());
    assert!(!client.connectors().resume("c1").await.unwrap().is_paused());
}

#[tokio::test]
async fn test_connector_update_retries_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/connectors/c1"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/connectors/c1"))
        .respond_with(success(connector_json("c1", false)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let update = UpdateConnector {
        sync_frequency: Some(60),
        ..Default::default()
    };
    let connector = client.connectors().update("c1", &update).await.unwrap();

    assert_eq!(connector.id, "c1");
}

#[tokio::test]
async fn test_connector_schemas_raw() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/connectors/c1/schemas"))
        .respond_with(success(json!({
            "schema_change_handling": "ALLOW_ALL",
            "schemas": {"public": {"enabled": true, "tables": {}}}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let schemas = client.connectors().schemas("c1").await.unwrap();

    assert_eq!(schemas["schemas"]["public"]["enabled"], true);
}

// ============================================================================
// Destination Tests
// ============================================================================

#[tokio::test]
async fn test_destination_setup_tests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/destinations/d1/test"))
        .respond_with(success(json!({
            "id": "d1",
            "group_id": "g1",
            "service": "snowflake",
            "setup_status": "connected",
            "setup_tests": [{"title": "Host Connection", "status": "PASSED"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let destination = client.destinations().run_setup_tests("d1").await.unwrap();

    assert_eq!(destination.setup_status.as_deref(), Some("connected"));
    assert!(destination.extra.contains_key("setup_tests"));
}

#[tokio::test]
async fn test_destination_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/destinations"))
        .and(body_json(json!({
            "group_id": "g1",
            "service": "big_query",
            "config": {"project_id": "p"},
            "region": "GCP_US_EAST4"
        })))
        .respond_with(success(json!({
            "id": "g1",
            "group_id": "g1",
            "service": "big_query",
            "region": "GCP_US_EAST4"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut new = NewDestination::new("g1", "big_query", json!({"project_id": "p"}));
    new.region = Some("GCP_US_EAST4".into());
    let destination = client.destinations().create(&new).await.unwrap();

    assert_eq!(destination.service, "big_query");
}

// ============================================================================
// Webhook Tests
// ============================================================================

#[tokio::test]
async fn test_webhook_create_group_and_test() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/webhooks/group/g1"))
        .and(body_json(json!({
            "url": "https://example.com/hooks",
            "events": ["sync_end"],
            "active": true,
            "secret": "shh"
        })))
        .respond_with(success(json!({
            "id": "w1",
            "type": "group",
            "group_id": "g1",
            "url": "https://example.com/hooks",
            "events": ["sync_end"],
            "active": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/webhooks/w1/test"))
        .and(body_json(json!({"event": "sync_end"})))
        .respond_with(success(json!({
            "succeed": true,
            "status": 200,
            "message": "OK"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let new = NewWebhook::new("https://example.com/hooks", vec!["sync_end".into()]).secret("shh");
    let webhook = client.webhooks().create_group("g1", &new).await.unwrap();
    assert_eq!(webhook.scope, WebhookScope::Group);

    let result = client.webhooks().test("w1", "sync_end").await.unwrap();
    assert!(result.succeed);
    assert_eq!(result.status, Some(200));
}

#[tokio::test]
async fn test_webhook_list_and_account_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/webhooks"))
        .respond_with(success(json!({"items": [], "next_cursor": null})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/webhooks/account"))
        .respond_with(success(json!({
            "id": "w2",
            "type": "account",
            "url": "https://example.com/all",
            "events": ["connection_failure"],
            "active": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.webhooks().list().collect_all().await.unwrap().is_empty());

    let new = NewWebhook::new("https://example.com/all", vec!["connection_failure".into()]);
    let webhook = client.webhooks().create_account(&new).await.unwrap();
    assert_eq!(webhook.scope, WebhookScope::Account);
    assert!(webhook.group_id.is_none());
}

#[tokio::test]
async fn test_webhook_get_and_delete() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/webhooks/program_quoth"))
        .respond_with(success(json!({
            "id": "program_quoth",
            "type": "account",
            "url": "https://example.com/hooks",
            "events": ["sync_end"],
            "active": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/webhooks/program_quoth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "Success"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let webhook = client.webhooks().get("program_quoth").await.unwrap();
    assert_eq!(webhook.id, "program_quoth");
    client.webhooks().delete("program_quoth").await.unwrap();
}

#[tokio::test]
async fn test_id_with_reserved_characters_stays_in_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/connectors/a%2Fb%3Fc"))
        .and(query_param_is_missing("c"))
        .respond_with(success(connector_json("a/b?c", false)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let connector = client.connectors().get("a/b?c").await.unwrap();
    assert_eq!(connector.id, "a/b?c");
}
