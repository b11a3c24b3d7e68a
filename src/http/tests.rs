//! Tests for the HTTP module

use super::*;
use crate::config::ShopifyConfig;
use crate::error::Error;
use crate::testing::fake_client;
use crate::types::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_config(server: &MockServer) -> ShopifyConfig {
    ShopifyConfig::builder()
        .store_domain("test-store.myshopify.com")
        .access_token("shpat_mock")
        .endpoint(server.uri())
        .no_rate_limit()
        .build()
}

#[tokio::test]
async fn test_transport_sends_auth_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2024-10/orders.json"))
        .and(query_param("limit", "5"))
        .and(header("X-Shopify-Access-Token", "shpat_mock"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orders": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ShopifyClient::new(&mock_config(&mock_server)).unwrap();
    let response = client
        .send(Method::GET, "/orders.json?limit=5", None)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"orders":[]}"#);
}

#[tokio::test]
async fn test_transport_post_body() {
    let mock_server = MockServer::start().await;
    let body = json!({"customer": {"email": "jane@example.com"}});

    Mock::given(method("POST"))
        .and(path("/admin/api/2024-10/customers.json"))
        .and(body_json(&body))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"customer": {"id": 7}})),
        )
        .mount(&mock_server)
        .await;

    let client = ShopifyClient::new(&mock_config(&mock_server)).unwrap();
    let decoded = client
        .send_json(Method::POST, "/customers.json", Some(&body))
        .await
        .unwrap();

    assert_eq!(decoded["customer"]["id"], 7);
}

#[tokio::test]
async fn test_transport_returns_link_header() {
    let mock_server = MockServer::start().await;
    let link = format!(
        "<{}/admin/api/2024-10/products.json?page_info=abc>; rel=\"next\"",
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/admin/api/2024-10/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link.as_str())
                .set_body_json(json!({"products": []})),
        )
        .mount(&mock_server)
        .await;

    let client = ShopifyClient::new(&mock_config(&mock_server)).unwrap();
    let response = client.send(Method::GET, "/products.json", None).await.unwrap();

    assert_eq!(response.link.as_deref(), Some(link.as_str()));
    assert_eq!(
        PageLinks::from_header(response.link.as_deref()).next.as_deref(),
        Some("abc")
    );
}

#[tokio::test]
async fn test_api_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2024-10/orders/9.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"errors":"Not Found"}"#))
        .mount(&mock_server)
        .await;

    let client = ShopifyClient::new(&mock_config(&mock_server)).unwrap();
    let err = client
        .send_json(Method::GET, "/orders/9.json", None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains(r#"{"errors":"Not Found"}"#));
}

#[tokio::test]
async fn test_transport_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({})),
        )
        .mount(&mock_server)
        .await;

    let config = ShopifyConfig::builder()
        .store_domain("test-store.myshopify.com")
        .access_token("shpat_mock")
        .endpoint(mock_server.uri())
        .no_rate_limit()
        .timeout(Duration::from_millis(50))
        .build();
    let client = ShopifyClient::new(&config).unwrap();
    let err = client.send(Method::GET, "/orders.json", None).await.unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_configuration_error_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(header_exists("X-Shopify-Access-Token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = ShopifyConfig::builder()
        .store_domain("test-store.myshopify.com")
        .access_token("")
        .endpoint(mock_server.uri())
        .build();
    let client = ShopifyClient::new(&config).unwrap();

    let start = Instant::now();
    let err = client.send(Method::GET, "/orders.json", None).await.unwrap_err();
    assert!(err.is_configuration());
    // No rate limit delay either
    assert!(start.elapsed() < Duration::from_millis(400));
}

#[tokio::test]
async fn test_rate_limit_applied_per_call() {
    let fake = crate::testing::FakeTransport::new();
    fake.push_json(200, json!({}));
    fake.push_json(200, json!({}));

    let config = ShopifyConfig::builder()
        .store_domain("test-store.myshopify.com")
        .access_token("shpat_test")
        .rate_limit_delay(Duration::from_millis(60))
        .build();
    let client = ShopifyClient::with_transport(&config, fake.clone());

    let start = Instant::now();
    client.send(Method::GET, "/orders.json", None).await.unwrap();
    client.send(Method::GET, "/orders.json", None).await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(120));
    assert_eq!(fake.requests().len(), 2);
}

#[tokio::test]
async fn test_fake_transport_records_request() {
    let (client, fake) = fake_client();
    fake.push_json(200, json!({"ok": true}));

    client
        .send(Method::PUT, "/products/1.json", Some(&json!({"product": {"id": 1}})))
        .await
        .unwrap();

    let request = fake.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(fake.last_path(), "/products/1.json");
    assert_eq!(request.body.as_deref(), Some(r#"{"product":{"id":1}}"#));
}

#[test]
fn test_client_is_cheap_to_clone() {
    let (client, fake) = fake_client();
    let _other = client.clone();
    assert_eq!(Arc::strong_count(&fake), 3);
}
