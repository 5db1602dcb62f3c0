//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqg::{
    config::{GatewayConfig, GatewayConfigBuilder},
    server::{build_app, AppState},
};
use tower::ServiceExt;
use wiremock::{MockServer, ResponseTemplate};

pub const WORKER_KEY: &str = "test-worker-key";
pub const PROVIDER_KEY: &str = "test-provider-key";
pub const VISION_MODEL: &str = "test/vision-model";
pub const TARGET_MODEL: &str = "test/target-model";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Config with test models and the worker key set, provider unset.
pub fn base_config() -> GatewayConfigBuilder {
    GatewayConfig::builder()
        .api_key(WORKER_KEY)
        .vision_model(VISION_MODEL)
        .target_model(TARGET_MODEL)
        .request_timeout_secs(5)
}

pub fn provider_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), COMPLETIONS_PATH)
}

/// Completions URL on a loopback port nothing listens on.
pub fn closed_provider_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, COMPLETIONS_PATH)
}

pub fn app_with_config(config: GatewayConfig) -> Router {
    let state = Arc::new(AppState::new(Arc::new(config), reqwest::Client::new()));
    build_app(state)
}

pub fn app_with_provider(server: &MockServer) -> Router {
    app_with_config(
        base_config()
            .provider(provider_url(server), PROVIDER_KEY)
            .build_unchecked(),
    )
}

/// A provider reply whose first choice carries `content`.
pub fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    }))
}

pub fn query_body(text: &str, image: Option<&str>) -> Value {
    match image {
        Some(image) => json!({"text": text, "base64ImageDataUrl": image}),
        None => json!({"text": text}),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Authenticated JSON POST.
pub async fn post_json(app: Router, path: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", WORKER_KEY))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}
