//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: settings file → client → Shopify API →
//! mapped entities, stored batches and trigger state

use clap::Parser;
use serde_json::json;
use shopify_tasks::cli::{Cli, Runner};
use shopify_tasks::resource::{OrderInput, ProductInput};
use shopify_tasks::template::TemplateContext;
use shopify_tasks::{
    ChangePoller, Error, FetchType, PollerConfig, QueryFilters, ShopifyClient, ShopifyConfig,
    StateManager, StorageDestination, TaskSettings,
};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/admin/api/2024-10";

fn client_for(server: &MockServer) -> ShopifyClient {
    let config = ShopifyConfig::builder()
        .store_domain("test-store.myshopify.com")
        .access_token("shpat_integration")
        .endpoint(server.uri())
        .no_rate_limit()
        .timeout(Duration::from_secs(5))
        .build();
    ShopifyClient::new(&config).unwrap()
}

// ============================================================================
// Settings → Client
// ============================================================================

#[tokio::test]
async fn test_settings_file_drives_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/customers.json")))
        .and(header("X-Shopify-Access-Token", "shpat_from_env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [{"id": 207119551, "email": "bob.norman@mail.example.com"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!(
        r#"
store_domain: test-store.myshopify.com
access_token: "{{{{ env.SHOPIFY_TOKEN }}}}"
endpoint: "{}"
rate_limit_delay_ms: 0
"#,
        server.uri()
    );
    let ctx = TemplateContext::new().with_env(json!({"SHOPIFY_TOKEN": "shpat_from_env"}));
    let settings = TaskSettings::from_yaml_str(&yaml, &ctx).unwrap();
    let client = ShopifyClient::new(&settings.to_config().unwrap()).unwrap();

    let output = client
        .customers()
        .fetch(&QueryFilters::new(), FetchType::Fetch, None)
        .await
        .unwrap();

    assert_eq!(output.count, 1);
    assert_eq!(
        output.entities[0].email.as_deref(),
        Some("bob.norman@mail.example.com")
    );
}

#[tokio::test]
async fn test_missing_token_fails_before_network() {
    let settings = TaskSettings {
        store_domain: Some("test-store.myshopify.com".to_string()),
        ..Default::default()
    };

    let err = settings.to_config().unwrap_err();
    assert!(err.is_configuration());
}

// ============================================================================
// List Operations
// ============================================================================

#[tokio::test]
async fn test_list_orders_with_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/orders.json")))
        .and(query_param("limit", "250"))
        .and(query_param("status", "any"))
        .and(query_param("financial_status", "paid"))
        .and(query_param("created_at_min", "2024-01-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [
                {
                    "id": 450789469,
                    "name": "#1001",
                    "created_at": "2024-01-05T10:00:00-05:00",
                    "total_price": "598.94",
                    "line_items": [{"id": 466157049, "quantity": 1, "title": "IPod Nano"}]
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filters = QueryFilters::new()
        .limit(1000)
        .status("any")
        .financial_status("paid")
        .created_at_min("2024-01-01T00:00:00Z");
    let page = client.orders().list(&filters).await.unwrap();

    assert_eq!(page.entities.len(), 1);
    let order = &page.entities[0];
    assert_eq!(order.name.as_deref(), Some("#1001"));
    assert_eq!(
        order.created_at.unwrap().to_rfc3339(),
        "2024-01-05T15:00:00+00:00"
    );
}

#[tokio::test]
async fn test_cursor_pagination() {
    let server = MockServer::start().await;
    let next = format!(
        "<{}{API}/products.json?limit=1&page_info=abc123>; rel=\"next\"",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path(format!("{API}/products.json")))
        .and(query_param("page_info", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": [{"id": 2}]})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/products.json")))
        .and(query_param("vendor", "Burton"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", next.as_str())
                .set_body_json(json!({"products": [{"id": 1}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client
        .products()
        .fetch(&QueryFilters::new().limit(1).vendor("Burton"), FetchType::Fetch, None)
        .await
        .unwrap();
    let cursor = first.next_page_info.clone().unwrap();
    assert_eq!(cursor, "abc123");

    // Other filters are dropped on cursor pages
    let second = client
        .products()
        .fetch(
            &QueryFilters::new().limit(1).vendor("Burton").page_info(cursor),
            FetchType::Fetch,
            None,
        )
        .await
        .unwrap();

    assert_eq!(second.entities[0].id, 2);
    assert!(second.next_page_info.is_none());
}

#[tokio::test]
async fn test_store_to_local_directory() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/customers.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [{"id": 1}, {"id": 2}, {"id": 3}]
        })))
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let storage = StorageDestination::parse(temp_dir.path().to_str().unwrap()).unwrap();
    let client = client_for(&server);

    let output = client
        .customers()
        .fetch(&QueryFilters::new(), FetchType::Store, Some(&storage))
        .await
        .unwrap();

    assert_eq!(output.count, 3);
    assert!(output.entities.is_empty());
    let uri = output.uri.unwrap();
    let contents = std::fs::read_to_string(uri.strip_prefix("file://").unwrap()).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.lines().all(|line| line.starts_with("{\"id\":")));
}

#[tokio::test]
async fn test_api_error_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/orders.json")))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"errors":"[API] Invalid API key or access token"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .orders()
        .list(&QueryFilters::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(matches!(err, Error::Api { ref body, .. } if body.contains("Invalid API key")));
}

// ============================================================================
// CRUD Operations
// ============================================================================

#[tokio::test]
async fn test_product_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{API}/products.json")))
        .and(body_json(json!({
            "product": {"title": "Burton Custom Freestyle 151", "vendor": "Burton", "status": "draft"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "product": {"id": 632910392, "title": "Burton Custom Freestyle 151", "status": "draft"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("{API}/products/632910392.json")))
        .and(body_json(json!({"product": {"id": 632910392, "status": "active"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": {"id": 632910392, "status": "active"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{API}/products/632910392.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let products = client.products();

    let created = products
        .create(&ProductInput {
            title: Some("Burton Custom Freestyle 151".into()),
            vendor: Some("Burton".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, 632910392);

    let updated = products
        .update(
            created.id,
            &ProductInput {
                status: Some("active".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status.as_deref(), Some("active"));

    let deleted = products.delete(created.id).await.unwrap();
    assert!(deleted.deleted);
}

#[tokio::test]
async fn test_create_order_for_customer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{API}/orders.json")))
        .and(body_json(json!({
            "order": {
                "line_items": [{"variant_id": 447654529, "quantity": 1}],
                "customer": {"id": 207119551},
                "financial_status": "pending",
                "inventory_behaviour": "bypass",
                "send_receipt": false,
                "send_fulfillment_receipt": false
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "order": {"id": 1073459962, "customer": {"id": 207119551}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input: OrderInput = serde_json::from_value(json!({
        "line_items": [{"variant_id": 447654529, "quantity": 1}],
        "customer_id": 207119551
    }))
    .unwrap();
    let order = client_for(&server).orders().create(&input).await.unwrap();

    assert_eq!(order.id, 1073459962);
    assert_eq!(order.customer.unwrap().id, 207119551);
}

#[tokio::test]
async fn test_get_missing_customer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/customers/99.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client_for(&server).customers().get(99, None).await.unwrap_err();
    assert_eq!(err.to_string(), "customer not found: 99");
}

// ============================================================================
// Change Detection
// ============================================================================

#[tokio::test]
async fn test_order_poller_persists_watermark() {
    let server = MockServer::start().await;
    let temp_dir = tempfile::tempdir().unwrap();
    let state_path = temp_dir.path().join("state.json");
    std::fs::write(
        &state_path,
        r#"{"triggers":{"order_created":{"watermark":"2024-06-01T10:00:00Z"}}}"#,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path(format!("{API}/orders.json")))
        .and(query_param("created_at_min", "2024-06-01T10:00:00Z"))
        .and(query_param("financial_status", "paid"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [
                {"id": 1, "created_at": "2024-06-01T10:00:00Z"},
                {"id": 2, "created_at": "2024-06-01T10:30:00Z"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = StateManager::from_file(&state_path).unwrap();
    let poller = ChangePoller::order_created(
        client_for(&server),
        PollerConfig::default().max_results(5).financial_status("paid"),
    );

    let event = poller.poll_once(&state).await.unwrap().unwrap();
    assert_eq!(event.count, 1);
    assert_eq!(event.entities[0].id, 2);

    let reloaded = StateManager::from_file(&state_path).unwrap();
    assert_eq!(
        reloaded.watermark("order_created").await.unwrap().to_rfc3339(),
        "2024-06-01T10:30:00+00:00"
    );
}

// ============================================================================
// CLI
// ============================================================================

#[tokio::test]
async fn test_cli_runs_against_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{API}/customers/207119551.json")))
        .and(header("X-Shopify-Access-Token", "shpat_cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let cli = Cli::try_parse_from([
        "shopify-tasks",
        "--store-domain",
        "test-store.myshopify.com",
        "--access-token",
        "shpat_cli",
        "--endpoint",
        uri.as_str(),
        "--rate-limit-delay-ms",
        "0",
        "customers",
        "delete",
        "207119551",
    ])
    .unwrap();

    Runner::new(cli).run().await.unwrap();
}

#[tokio::test]
async fn test_cli_store_requires_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orders": []})))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    let cli = Cli::try_parse_from([
        "shopify-tasks",
        "--store-domain",
        "test-store.myshopify.com",
        "--access-token",
        "shpat_cli",
        "--endpoint",
        uri.as_str(),
        "orders",
        "list",
        "--fetch-type",
        "store",
    ])
    .unwrap();

    let err = Runner::new(cli).run().await.unwrap_err();
    assert!(err.is_configuration());
}
