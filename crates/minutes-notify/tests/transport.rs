//! Integration tests for `ReqwestTransport` using wiremock HTTP mocks.

use minutes_notify::{ReqwestTransport, WebhookTransport};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn posts_json_and_returns_status() {
    let server = MockServer::start().await;
    let payload = json!({"title": "회의", "notion_url": null});

    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(30).unwrap();
    let status = transport
        .post_json(&format!("{}/hook", server.uri()), &payload)
        .await
        .unwrap();
    assert_eq!(status, 202);
}

#[tokio::test]
async fn error_status_is_returned_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(30).unwrap();
    let status = transport
        .post_json(&format!("{}/hook", server.uri()), &json!({}))
        .await
        .unwrap();
    assert_eq!(status, 410);
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let server = MockServer::start().await;
    let url = format!("{}/hook", server.uri());
    drop(server);

    let transport = ReqwestTransport::new(5).unwrap();
    assert!(transport.post_json(&url, &json!({})).await.is_err());
}
