use crate::common::{RecordingTransport, LISTING_PAGE};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pc_quote::config::{load_config, RetailerConfig, ServerConfig};
use pc_quote::fetch::{build_http_client, DirectFetcher};
use pc_quote::listing::ScraperMarkup;
use pc_quote::secrets::StaticSecrets;
use pc_quote::server::{build_router, AppState, ErrorBody};
use pc_quote::{PartsSearchHandler, QuoteEmailHandler};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a router whose searches hit `mock_server` and whose mail is recorded
fn test_router(mock_server: &MockServer, transport: Arc<RecordingTransport>) -> Router {
    let client = build_http_client(&RetailerConfig::default()).expect("Failed to build client");
    let search = PartsSearchHandler::new(
        Arc::new(DirectFetcher::new(client)),
        Arc::new(ScraperMarkup::new().expect("Failed to build markup parser")),
        format!("{}/p/pl?d=", mock_server.uri()),
    );
    let quote = QuoteEmailHandler::new(transport, "quotes@example.com");

    build_router(AppState::new(search, quote), &ServerConfig::default())
        .expect("Failed to build router")
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    let response = router.oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).expect("Body is not JSON");
    (status, value)
}

async fn mount_listing_page(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/p/pl"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_search_parts_route() {
    let mock_server = MockServer::start().await;
    mount_listing_page(&mock_server).await;
    let router = test_router(&mock_server, Arc::new(RecordingTransport::default()));

    let (status, body) = post_json(
        router,
        "/searchParts",
        json!({ "partType": "cpu", "searchTerm": "ryzen" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().expect("results is an array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[1]["id"], "cpu-amd-ryzen-5-5600-2");
    assert_eq!(results[1]["name"], "AMD Ryzen 5 5600");
    assert_eq!(results[1]["price"], 129.0);
    assert_eq!(results[1]["image"], "/images/5600.jpg");
}

#[tokio::test]
async fn test_search_parts_missing_field() {
    let mock_server = MockServer::start().await;
    let router = test_router(&mock_server, Arc::new(RecordingTransport::default()));

    let (status, body) = post_json(router, "/searchParts", json!({ "partType": "cpu" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ErrorBody = serde_json::from_value(body).expect("Not an error body");
    assert_eq!(body.error.status, "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_search_parts_upstream_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway at edge-3"))
        .mount(&mock_server)
        .await;
    let router = test_router(&mock_server, Arc::new(RecordingTransport::default()));

    let (status, body) = post_json(
        router,
        "/searchParts",
        json!({ "partType": "gpu", "searchTerm": "rtx" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["status"], "INTERNAL");
    assert_eq!(body["error"]["message"], "Failed to fetch parts data.");
    assert!(!body.to_string().contains("edge-3"));
}

#[tokio::test]
async fn test_send_quote_email_route() {
    let mock_server = MockServer::start().await;
    let transport = Arc::new(RecordingTransport::default());
    let router = test_router(&mock_server, transport.clone());

    let (status, body) = post_json(
        router,
        "/sendQuoteEmail",
        json!({
            "quoteId": "Q1",
            "parts": [{ "name": "GPU", "price": 499.99 }],
            "estimatedTotal": 499.99
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New PC Build Quote Request - #Q1");
    assert!(sent[0].html.contains("GPU"));
    assert!(sent[0].html.contains("$499.99"));
}

#[tokio::test]
async fn test_send_quote_email_zero_total_rejected() {
    let mock_server = MockServer::start().await;
    let transport = Arc::new(RecordingTransport::default());
    let router = test_router(&mock_server, transport.clone());

    let (status, body) = post_json(
        router,
        "/sendQuoteEmail",
        json!({ "quoteId": "Q1", "parts": [], "estimatedTotal": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_send_quote_email_transport_failure() {
    let mock_server = MockServer::start().await;
    let router = test_router(&mock_server, Arc::new(RecordingTransport::failing()));

    let (status, body) = post_json(
        router,
        "/sendQuoteEmail",
        json!({
            "quoteId": "Q2",
            "parts": [{ "name": "CPU", "price": 200 }],
            "estimatedTotal": 200
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Failed to send email.");
    assert!(!body.to_string().contains("421"));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_argument() {
    let mock_server = MockServer::start().await;
    let router = test_router(&mock_server, Arc::new(RecordingTransport::default()));

    let request = Request::builder()
        .method("POST")
        .uri("/sendQuoteEmail")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");

    let response = router.oneshot(request).await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_route() {
    let mock_server = MockServer::start().await;
    let router = test_router(&mock_server, Arc::new(RecordingTransport::default()));

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = router.oneshot(request).await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_app_from_config_file() {
    let mock_server = MockServer::start().await;
    mount_listing_page(&mock_server).await;

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"
[server]
bind-address = "127.0.0.1:0"

[retailer]
search-url = "{}/p/pl?d="

[mail]
recipient = "quotes@example.com"
"#,
        mock_server.uri()
    )
    .expect("Failed to write config");
    file.flush().expect("Failed to flush config");

    let config = load_config(file.path()).expect("Failed to load config");
    let state =
        AppState::from_config(&config, &StaticSecrets::new()).expect("Failed to build state");
    let router = build_router(state, &config.server).expect("Failed to build router");

    let (status, body) = post_json(
        router.clone(),
        "/searchParts",
        json!({ "partType": "cpu", "searchTerm": "ryzen" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().map(Vec::len), Some(2));

    // No mail credentials were provided, so sending fails opaquely
    let (status, body) = post_json(
        router,
        "/sendQuoteEmail",
        json!({
            "quoteId": "Q3",
            "parts": [{ "name": "RAM", "price": 80 }],
            "estimatedTotal": 80
        }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Failed to send email.");
}
