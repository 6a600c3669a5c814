mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;
use serde_json::Value;

#[tokio::test]
async fn edge_request_id_is_reported() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/v1/fail/mystery"))
        .header("cf-ray", "8c1f2a3b4d5e6f70-CDG")
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();

    let body = resp.json::<Value>().await.unwrap();
    assert_eq!(body["requestId"], "8c1f2a3b4d5e6f70-CDG");
}

#[tokio::test]
async fn falls_back_to_x_request_id() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/v1/fail/mystery"))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();

    let body = resp.json::<Value>().await.unwrap();
    assert_eq!(body["requestId"], "req-123");
}

#[tokio::test]
async fn configured_headers_replace_defaults() {
    let config = ConfigBuilder::new()
        .with_request_id_headers(&["x-correlation-id"])
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/v1/fail/mystery"))
        .header("cf-ray", "ignored-CDG")
        .send()
        .await
        .unwrap();

    let body = resp.json::<Value>().await.unwrap();
    assert_eq!(body["requestId"], "unknown");
}

#[tokio::test]
async fn only_fallback_reports_request_id() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/v1/fail/timeout"))
        .header("cf-ray", "8c1f2a3b4d5e6f70-CDG")
        .send()
        .await
        .unwrap();

    let body = resp.json::<Value>().await.unwrap();
    assert!(body.get("requestId").is_none());
}
