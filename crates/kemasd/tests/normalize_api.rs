//! End-to-end tests for the normalize API.
//!
//! A fake upstream generative-table service is bound to a loopback port
//! with a canned payload; the daemon's router is driven directly via
//! `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use kemasd::config::Config;
use kemasd::server::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config(api_url: &str) -> Config {
    let api_url = api_url.to_string();
    Config::from_source(move |key| match key {
        "JAMAI_BASE_API_KEY" => Some("jamai_sk_test".to_string()),
        "JAMAI_BASE_PROJECT_ID" => Some("proj_test".to_string()),
        "JAMAI_BASE_API_URL" => Some(api_url.clone()),
        _ => None,
    })
}

/// Serve one canned response for every row-insertion request.
async fn spawn_upstream(status: StatusCode, payload: Value) -> String {
    let app = Router::new().route(
        "/api/v1/gen_tables/action/rows/add",
        post(move || {
            let payload = payload.clone();
            async move { (status, Json(payload)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn normalize_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/normalize")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_envelope_text_and_fenced_summary() {
    let payload = json!({
        "rows": [{
            "ID": "row_123",
            "columns": {
                "normalized_text": {
                    "choices": [{"message": {"content": "seperti biasa"}}]
                },
                "normalization_summary": {
                    "choices": [{"message": {"content":
                        "```json\n[{\"original_word\":\"mcm\",\"normalized_word\":\"seperti\",\"category\":\"short_form\",\"reason\":\"common abbreviation of seperti/macam\"}]\n```"
                    }}]
                }
            }
        }]
    });

    let api_url = spawn_upstream(StatusCode::OK, payload).await;
    let app = build_router(AppState::new(test_config(&api_url)));

    let response = app
        .oneshot(normalize_request(r#"{"inputText": "xoxo mcm biasa"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["normalizedText"], json!("seperti biasa"));
    assert_eq!(body["rowId"], json!("row_123"));

    let summary = body["normalizationSummary"].as_array().unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0]["original_word"], json!("mcm"));
    assert_eq!(summary[0]["normalized_word"], json!("seperti"));
    assert_eq!(summary[0]["category"], json!("short_form"));
    assert!(summary[0]["reason"].is_string());

    // Diagnostic echo of the raw upstream payload.
    assert_eq!(body["debug"]["hasRows"], json!(true));
    assert_eq!(body["debug"]["rowCount"], json!(1));
    assert_eq!(body["debug"]["firstRow"]["ID"], json!("row_123"));
}

#[tokio::test]
async fn test_malformed_summary_degrades_but_request_succeeds() {
    let payload = json!({
        "rows": [{
            "ID": "row_456",
            "columns": {
                "normalized_text": {"text": "sudah makan"},
                "normalization_summary": {"text": "Sorry, I cannot produce JSON today"}
            }
        }]
    });

    let api_url = spawn_upstream(StatusCode::OK, payload).await;
    let app = build_router(AppState::new(test_config(&api_url)));

    let response = app
        .oneshot(normalize_request(r#"{"inputText": "dah mkn"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["normalizedText"], json!("sudah makan"));
    assert_eq!(body["normalizationSummary"], json!([]));
    assert_eq!(body["informalFeaturesPercentage"], Value::Null);
}

#[tokio::test]
async fn test_upstream_429_is_forwarded() {
    let api_url = spawn_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"message": "rate limited"}),
    )
    .await;
    let app = build_router(AppState::new(test_config(&api_url)));

    let response = app
        .oneshot(normalize_request(r#"{"inputText": "xoxo mcm biasa"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = response_json(response).await;
    assert!(body["error"].is_string());
    assert_eq!(body["details"]["message"], json!("rate limited"));
}

#[tokio::test]
async fn test_blank_input_rejected_before_outbound_call() {
    // Unroutable upstream: the request must be rejected before any call.
    let app = build_router(AppState::new(test_config("http://127.0.0.1:1")));

    for body in [r#"{"inputText": "   "}"#, r#"{"inputText": ""}"#, "{}"] {
        let response = app
            .clone()
            .oneshot(normalize_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);

        let json = response_json(response).await;
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_missing_credentials_short_circuits() {
    let config = Config::from_source(|_| None);
    let app = build_router(AppState::new(config));

    let response = app
        .oneshot(normalize_request(r#"{"inputText": "xoxo mcm biasa"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("credentials"));
}

#[tokio::test]
async fn test_unreachable_upstream_is_internal_error() {
    let app = build_router(AppState::new(test_config("http://127.0.0.1:1")));

    let response = app
        .oneshot(normalize_request(r#"{"inputText": "xoxo mcm biasa"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert!(body["error"].is_string());
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_router(AppState::new(Config::from_source(|_| None)));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], json!("healthy"));
    assert!(body["version"].is_string());
}
