use accord_client::{
    Client, ClientConfig, ClientError, FetchEntitlements, HttpTransport, RecordingSink, RestRequest, Transport,
};
use accord_types::Snowflake;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        api_base_url: server.uri(),
        token: Some("secret".to_string()),
        application_id: Some(Snowflake::new(7)),
        ..ClientConfig::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ── Config defaults ─────────────────────────────────────────────

#[test]
fn client_config_default() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.api_base_url, "https://discord.com/api/v10");
    assert!(cfg.token.is_none());
    assert!(cfg.application_id.is_none());
    assert_eq!(cfg.request_timeout().as_secs(), 30);
    assert_eq!(cfg.max_cached_messages, Some(200));
    assert_eq!(cfg.tombstone_horizon().as_secs(), 300);
    assert!(cfg.emit_debug);
}

#[test]
fn client_config_fills_missing_fields() {
    let cfg: ClientConfig = serde_json::from_str(r#"{"application_id": "7", "emit_debug": false}"#).unwrap();
    assert_eq!(cfg.application_id, Some(Snowflake::new(7)));
    assert!(!cfg.emit_debug);
    assert_eq!(cfg.api_base_url, "https://discord.com/api/v10");
}

#[test]
fn client_config_serde_roundtrip() {
    let cfg = ClientConfig {
        token: Some("abc".to_string()),
        max_cached_messages: None,
        ..Default::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, cfg);
}

// ── Transport ───────────────────────────────────────────────────

#[tokio::test]
async fn sends_bot_token_and_query() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/7/skus"))
        .and(header("Authorization", "Bot secret"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let body = transport
        .request(RestRequest::get("/applications/7/skus").query("limit", 5))
        .await
        .unwrap();

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/applications/7/entitlements"))
        .and(body_json(json!({"sku_id": "600"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let body = transport
        .request(RestRequest::post("/applications/7/entitlements").body(json!({"sku_id": "600"})))
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/applications/7/entitlements/501"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let body = transport
        .request(RestRequest::delete("/applications/7/entitlements/501"))
        .await
        .unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn non_success_status_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"message": "Missing Access"}"#))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let err = transport
        .request(RestRequest::get("/applications/7/skus"))
        .await
        .unwrap_err();

    match err {
        ClientError::Http { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("Missing Access"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_is_a_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let err = transport
        .request(RestRequest::get("/applications/7/skus"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Serialization(_)));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/7/skus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        api_base_url: format!("{}/", server.uri()),
        ..config_for(&server)
    };
    let transport = HttpTransport::new(&config).unwrap();
    transport
        .request(RestRequest::get("/applications/7/skus"))
        .await
        .unwrap();
}

// ── End to end ──────────────────────────────────────────────────

#[tokio::test]
async fn manager_over_http_caches_results() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/7/entitlements"))
        .and(query_param("guild_id", "1"))
        .and(query_param("exclude_deleted", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "501", "sku_id": "600", "application_id": "7", "guild_id": "1", "type": 8}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_http(config_for(&server), Arc::new(RecordingSink::new())).unwrap();
    let listed = client
        .entitlements()
        .fetch_many(FetchEntitlements {
            guild_id: Some(Snowflake::new(1)),
            exclude_deleted: true,
            ..FetchEntitlements::default()
        })
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    let cached = client.cache().entitlements.get(&Snowflake::new(501)).unwrap();
    assert_eq!(cached.read().guild_id, Some(Snowflake::new(1)));
}
