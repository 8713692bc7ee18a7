//! Shared helpers for HTTP-level tests
//!
//! Each test app runs against a fresh in-memory SurrealDB instance, so
//! tests are fully isolated from one another.

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use postboard_service::config::SurrealDbConfig;
use postboard_service::store::connect;
use postboard_service::{web, AppState};

/// Application name used by the test router, matching alert header assertions
pub const APP_NAME: &str = "postboard";

/// Build a router over a fresh `mem://` database
pub async fn test_app() -> Router {
    let config = SurrealDbConfig {
        url: "mem://".to_string(),
        namespace: "test".to_string(),
        database: "test".to_string(),
        username: None,
        password: None,
        max_retries: 0,
        retry_delay_secs: 1,
    };
    let client = connect(&config).await.expect("mem:// connection");
    web::router(AppState::with_client(client, APP_NAME))
}

/// Send a request and collect status, headers and parsed JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("infallible router");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, headers, body)
}

/// Build a JSON request with the given method, uri and body
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Build a merge-patch request
pub fn merge_patch_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/merge-patch+json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Build a bodyless request (GET/DELETE)
pub fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}
