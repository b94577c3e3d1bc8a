/// Router-level tests driving the HTTP API
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use rent_forecast::{
    config::{Config, SourceKind},
    handlers::estimate::AppState,
    server::create_router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    app_with(Config::default())
}

fn app_with(config: Config) -> Router {
    create_router(AppState::new(config), None, "/metrics")
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_reports_source() {
    let (status, body) = send(&app(), "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "mock");
}

#[tokio::test]
async fn test_estimate_mock_market() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/v1/estimate",
        Some(json!({ "location": "Austin", "bedrooms": "1br", "horizon_years": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["degraded"], false);
    assert_eq!(body["estimate"]["source"], "mock");
    assert_eq!(body["estimate"]["current_rent"], 1650.0);
    // 1650 * 1.06, 1650 * 1.06^2
    assert_eq!(body["estimate"]["projections"], json!([1749.0, 1854.0]));
    assert!(body["scores"]["affordability"].as_f64().unwrap() <= 100.0);
}

#[tokio::test]
async fn test_estimate_empty_location_is_rejected() {
    let (status, body) = send(
        &app(),
        "POST",
        "/v1/estimate",
        Some(json!({ "location": "   ", "bedrooms": "2br" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "validation_error");
    assert_eq!(body["error"]["message"], "Please enter a location");
}

#[tokio::test]
async fn test_estimate_horizon_above_max_is_rejected() {
    let (status, body) = send(
        &app(),
        "POST",
        "/v1/estimate",
        Some(json!({ "location": "Denver", "horizon_years": 50 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "validation_error");
}

#[tokio::test]
async fn test_comparison_session_flow() {
    let app = app();
    let uri = "/v1/comparisons/desk-42";

    let (status, body) = send(&app, "POST", uri, Some(json!({ "location": "Seattle" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows"].as_array().unwrap().len(), 1);

    // Same place, different spelling: replaces the row in place
    let (_, body) = send(&app, "POST", uri, Some(json!({ "location": " seattle " }))).await;
    assert_eq!(body["rows"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "POST", uri, Some(json!({ "location": "Miami" }))).await;
    assert_eq!(body["rows"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, "DELETE", "/v1/comparisons/desk-42/Seattle", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["location"], "Miami");

    let (status, _) = send(&app, "DELETE", uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comparison_rejects_bad_session() {
    let (status, body) = send(&app(), "GET", "/v1/comparisons/bad.session", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "validation_error");
}

#[tokio::test]
async fn test_comparison_delete_uses_entered_location() {
    let app = app();
    let uri = "/v1/comparisons/s1";

    // Mock reports "Austin" for "Austin, TX"
    let (_, body) = send(&app, "POST", uri, Some(json!({ "location": "Austin, TX" }))).await;
    assert_eq!(body["rows"][0]["location"], "Austin");
    assert_eq!(body["rows"][0]["query_location"], "Austin, TX");

    let (status, body) = send(&app, "DELETE", "/v1/comparisons/s1/Austin%2C%20TX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comparison_keeps_cities_sharing_a_state() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/2022/acs/acs1")
                .query_param("for", "state:48");
            then.status(200).json_body(json!([
                ["NAME", "B25064_001E", "state"],
                ["Texas", "1271", "48"]
            ]));
        })
        .await;

    let mut config = Config::default();
    config.estimation.source = SourceKind::Census;
    config.providers.census.enabled = true;
    config.providers.census.api_key = "census-test-key".to_string();
    config.providers.census.base_url = server.base_url();
    let app = app_with(config);
    let uri = "/v1/comparisons/tx";

    send(&app, "POST", uri, Some(json!({ "location": "Austin, TX" }))).await;
    let (status, body) = send(&app, "POST", uri, Some(json!({ "location": "Dallas, TX" }))).await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["location"], "Texas");
    assert_eq!(rows[0]["query_location"], "Austin, TX");
    assert_eq!(rows[1]["query_location"], "Dallas, TX");

    let (_, body) = send(&app, "DELETE", "/v1/comparisons/tx/austin,%20tx", None).await;
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["query_location"], "Dallas, TX");
}
