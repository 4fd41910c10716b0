use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fragrance_match_api::api::{create_router, AppState, RouterConfig};
use fragrance_match_api::error::UpstreamError;
use fragrance_match_api::services::providers::ModelClient;
use fragrance_match_api::services::{RecommendationService, RetryPolicy, RetryingInvoker};

/// Model stub that answers every call with the same reply, after `delay`
struct StubClient {
    reply: Result<String, UpstreamError>,
    delay: Duration,
    calls: AtomicU32,
}

#[async_trait::async_trait]
impl ModelClient for StubClient {
    async fn invoke(&self, _prompt: &str) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn canonical_payload() -> String {
    json!({
        "recommendations": [{
            "name": "Test Fragrance",
            "brand": "Test Brand",
            "description": "Test Description",
            "topNotes": ["citrus", "bergamot"],
            "heartNotes": ["rose", "jasmine"],
            "baseNotes": ["musk", "amber"],
            "matchReason": "Perfect match for your preferences",
            "priceRange": "$60-80",
            "longevity": "6-8 hours",
            "projection": "Moderate"
        }],
        "analysis": "You prefer fresh, energetic scents",
        "tips": "Test on skin before purchasing"
    })
    .to_string()
}

fn valid_request() -> Value {
    json!({
        "preferences": "I love fresh, citrusy scents that make me feel energetic",
        "preferredNotes": ["citrus", "bergamot"],
        "intensity": "moderate",
        "occasion": "daily",
        "season": "summer"
    })
}

fn create_test_server(reply: Result<String, UpstreamError>) -> (TestServer, Arc<StubClient>) {
    create_test_server_with(reply, Duration::ZERO, &RouterConfig::default())
}

fn create_test_server_with(
    reply: Result<String, UpstreamError>,
    delay: Duration,
    router_config: &RouterConfig,
) -> (TestServer, Arc<StubClient>) {
    let client = Arc::new(StubClient {
        reply,
        delay,
        calls: AtomicU32::new(0),
    });
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(1),
    };
    let service = RecommendationService::new(RetryingInvoker::new(client.clone(), policy));
    let app = create_router(AppState::new(service), router_config);
    (TestServer::new(app).unwrap(), client)
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server(Ok(canonical_payload()));
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "ai-fragrance-microservice");
    assert_eq!(body["checks"]["modelApi"], "configured");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_match_returns_model_recommendations() {
    let (server, client) = create_test_server(Ok(canonical_payload()));

    let response = server.post("/fragrance/match").json(&valid_request()).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["name"], "Test Fragrance");
    assert_eq!(recommendations[0]["topNotes"], json!(["citrus", "bergamot"]));
    assert_eq!(body["analysis"], "You prefer fresh, energetic scents");
    assert_eq!(body["tips"], "Test on skin before purchasing");

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert_eq!(body.as_object().unwrap().len(), 4);
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_model_output_returns_fallback() {
    let (server, _) = create_test_server(Ok("Invalid JSON response".to_string()));

    let response = server.post("/fragrance/match").json(&valid_request()).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let names: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Acqua di Gio", "Light Blue", "Black Opium"]);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unreachable_model_returns_service_unavailable() {
    let (server, client) =
        create_test_server(Err(UpstreamError::Transport("connection refused".to_string())));

    let response = server.post("/fragrance/match").json(&valid_request()).await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert_eq!(body["statusCode"], 503);
    assert_eq!(
        body["message"],
        "Failed to generate fragrance recommendations. Please try again later."
    );
    assert_eq!(body["path"], "/fragrance/match");
    assert_eq!(body["method"], "POST");
    assert!(body["timestamp"].is_string());
    assert!(body.get("error").is_none());
    assert_eq!(client.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_slow_model_exceeding_request_timeout_returns_json_error() {
    let router_config = RouterConfig {
        request_timeout: Duration::from_millis(600),
        ..RouterConfig::default()
    };
    let (server, _) = create_test_server_with(
        Err(UpstreamError::Timeout),
        Duration::from_millis(300),
        &router_config,
    );

    let response = server
        .post("/fragrance/match")
        .json(&valid_request())
        .await;
    response.assert_status(StatusCode::GATEWAY_TIMEOUT);

    let body: Value = response.json();
    assert_eq!(body["statusCode"], 504);
    assert_eq!(
        body["message"],
        "Fragrance recommendations took too long. Please try again later."
    );
    assert_eq!(body["path"], "/fragrance/match");
    assert_eq!(body["method"], "POST");
}

#[tokio::test]
async fn test_slow_model_within_request_timeout_returns_service_unavailable() {
    let router_config = RouterConfig {
        request_timeout: Duration::from_secs(5),
        ..RouterConfig::default()
    };
    let (server, client) = create_test_server_with(
        Err(UpstreamError::Timeout),
        Duration::from_millis(50),
        &router_config,
    );

    let response = server
        .post("/fragrance/match")
        .json(&valid_request())
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(client.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_invalid_request_rejected_before_model() {
    let (server, client) = create_test_server(Ok(canonical_payload()));

    let response = server
        .post("/fragrance/match")
        .json(&json!({
            "preferences": "test",
            "preferredNotes": [],
            "intensity": "invalid"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_validation_messages_returned() {
    let (server, _) = create_test_server(Ok(canonical_payload()));

    let mut request = valid_request();
    request["preferences"] = json!("short");
    request["preferredNotes"] = json!([]);

    let response = server.post("/fragrance/match").json(&request).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["path"], "/fragrance/match");
    assert_eq!(body["method"], "POST");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Description must be at least 10 characters long"));
    assert!(message.contains("At least one preferred note is required"));
}

#[tokio::test]
async fn test_unknown_fields_rejected() {
    let (server, _) = create_test_server(Ok(canonical_payload()));

    let mut request = valid_request();
    request["admin"] = json!(true);

    let response = server.post("/fragrance/match").json(&request).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let (server, _) = create_test_server(Ok(canonical_payload()));
    let id = "2f1c9a52-5a0e-4f5b-8f0a-3a7f3f1c2d10";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_cors_preflight_allows_request_id_header() {
    let (server, _) = create_test_server(Ok(canonical_payload()));

    let response = server
        .method(Method::OPTIONS, "/fragrance/match")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:3000"),
        )
        .add_header(
            HeaderName::from_static("access-control-request-method"),
            HeaderValue::from_static("POST"),
        )
        .add_header(
            HeaderName::from_static("access-control-request-headers"),
            HeaderValue::from_static("content-type,x-request-id"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("access-control-allow-origin"),
        "http://localhost:3000"
    );
    let allowed = response
        .header("access-control-allow-headers")
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("x-request-id"), "allowed headers: {}", allowed);
    assert!(allowed.contains("content-type"), "allowed headers: {}", allowed);
}

#[tokio::test]
async fn test_cors_exposes_request_id_header() {
    let (server, _) = create_test_server(Ok(canonical_payload()));

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:3000"),
        )
        .await;

    response.assert_status_ok();
    let exposed = response
        .header("access-control-expose-headers")
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(exposed.contains("x-request-id"), "exposed headers: {}", exposed);
    assert!(!response.header("x-request-id").is_empty());
}
