mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const IMAGE: &str = "data:image/png;base64,Zm9v";

fn vision_call() -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_partial_json(json!({"model": VISION_MODEL})))
}

fn target_call() -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_partial_json(json!({"model": TARGET_MODEL})))
}

async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.body_json::<Value>().unwrap())
        .collect()
}

#[tokio::test]
async fn empty_input_is_rejected_without_upstream_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&server)
        .await;

    for body in [json!({"text": ""}), json!({}), json!({"text": "  ", "base64ImageDataUrl": null})] {
        let (status, response) = post_json(app_with_provider(&server), "/query", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
        assert!(message(&response).contains("Requires text or image data"));
    }
}

#[tokio::test]
async fn text_only_query_makes_one_target_call() {
    let server = MockServer::start().await;
    target_call()
        .and(header("authorization", format!("Bearer {}", PROVIDER_KEY).as_str()))
        .and(body_partial_json(json!({
            "max_tokens": 3000,
            "messages": [{"role": "user", "content": "How do I reset my password?"}]
        })))
        .respond_with(completion("Open Settings > Account."))
        .expect(1)
        .mount(&server)
        .await;
    vision_call()
        .respond_with(completion("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        app_with_provider(&server),
        "/query",
        &query_body("How do I reset my password?", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ai_text": "Open Settings > Account."}));
}

#[tokio::test]
async fn screenshot_query_chains_vision_then_target() {
    let server = MockServer::start().await;
    vision_call()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "{\"main_window\":\"Settings\"}"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    target_call()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Try restarting."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        app_with_provider(&server),
        "/query",
        &query_body("app crashes", Some(IMAGE)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ai_text": "Try restarting."}));

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["model"], VISION_MODEL);
    assert_eq!(bodies[0]["max_tokens"], 2048);
    assert_eq!(bodies[0]["messages"][0]["content"][1]["type"], "image_url");
    assert_eq!(bodies[0]["messages"][0]["content"][1]["image_url"]["url"], IMAGE);
    assert_eq!(bodies[1]["model"], TARGET_MODEL);
}

#[tokio::test]
async fn fenced_vision_json_is_stripped_and_embedded_verbatim() {
    let server = MockServer::start().await;
    let inner = "{\n  \"main_window\": \"Terminal\",\n  \"relevant_elements\": []\n}";
    vision_call()
        .respond_with(completion(&format!("```json\n{}\n```", inner)))
        .expect(1)
        .mount(&server)
        .await;
    target_call()
        .respond_with(completion("Run the command again with sudo."))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = post_json(
        app_with_provider(&server),
        "/query",
        &query_body("permission denied", Some(IMAGE)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let bodies = received_bodies(&server).await;
    let prompt = bodies[1]["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains(&format!("--- JSON START ---\n{}\n--- JSON END ---", inner)));
    assert!(prompt.contains("\"permission denied\""));
    assert!(!prompt.contains("```"));
}

#[tokio::test]
async fn invalid_vision_json_never_reaches_target() {
    let server = MockServer::start().await;
    vision_call()
        .respond_with(completion("I see a settings window with a red banner."))
        .expect(1)
        .mount(&server)
        .await;
    target_call()
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        app_with_provider(&server),
        "/query",
        &query_body("what is wrong?", Some(IMAGE)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        message(&body),
        "AI description step failed: Output was not valid JSON"
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn vision_503_maps_to_502_and_skips_target() {
    let server = MockServer::start().await;
    vision_call()
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .expect(1)
        .mount(&server)
        .await;
    target_call()
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        app_with_provider(&server),
        "/query",
        &query_body("app crashes", Some(IMAGE)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(
        message(&body),
        "AI Vision Step Failed (503): upstream overloaded"
    );
}

#[tokio::test]
async fn upstream_4xx_status_is_passed_through() {
    let server = MockServer::start().await;
    target_call()
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) =
        post_json(app_with_provider(&server), "/query", &query_body("hi", None)).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(message(&body), "Direct AI Query Failed (429): Request failed");
}

#[tokio::test]
async fn null_content_is_an_internal_error() {
    let server = MockServer::start().await;
    target_call()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": null}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) =
        post_json(app_with_provider(&server), "/query", &query_body("hi", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(&body), "Direct AI response content was empty");
}

#[tokio::test]
async fn empty_vision_content_is_reported_for_vision_stage() {
    let server = MockServer::start().await;
    vision_call()
        .respond_with(completion("   "))
        .expect(1)
        .mount(&server)
        .await;
    target_call()
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        app_with_provider(&server),
        "/query",
        &query_body("hi", Some(IMAGE)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(&body), "AI description content was empty");
}

#[tokio::test]
async fn provider_logic_error_maps_to_400() {
    let server = MockServer::start().await;
    target_call()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"message": "content policy violation", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) =
        post_json(app_with_provider(&server), "/query", &query_body("hi", None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Direct AI Query Error: content policy violation");
}

#[tokio::test]
async fn provider_string_error_maps_to_400() {
    let server = MockServer::start().await;
    target_call()
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": "Provider rejected request: policy"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) =
        post_json(app_with_provider(&server), "/query", &query_body("hi", None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message(&body),
        "Direct AI Query Error: Provider rejected request: policy"
    );
}

#[tokio::test]
async fn null_first_choice_is_an_internal_error() {
    let server = MockServer::start().await;
    target_call()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": [null]})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) =
        post_json(app_with_provider(&server), "/query", &query_body("hi", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(&body), "Direct AI response content was empty");
}

#[tokio::test]
async fn malformed_provider_body_maps_to_502() {
    let server = MockServer::start().await;
    target_call()
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) =
        post_json(app_with_provider(&server), "/query", &query_body("hi", None)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(message(&body).starts_with("Failed processing direct AI query: "));
}

#[tokio::test]
async fn reasoning_timeout_maps_to_504() {
    let server = MockServer::start().await;
    vision_call()
        .respond_with(completion("{}"))
        .expect(1)
        .mount(&server)
        .await;
    target_call()
        .respond_with(completion("too late").set_delay(Duration::from_secs(3)))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with_config(
        base_config()
            .provider(provider_url(&server), PROVIDER_KEY)
            .request_timeout_secs(1)
            .build_unchecked(),
    );
    let (status, body) = post_json(app, "/query", &query_body("hi", Some(IMAGE))).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(message(&body), "Request to Target AI timed out");
}

#[tokio::test]
async fn unreachable_provider_maps_to_502() {
    let app = app_with_config(
        base_config()
            .provider(closed_provider_url(), PROVIDER_KEY)
            .build_unchecked(),
    );
    let (status, body) = post_json(app, "/query", &query_body("hi", Some(IMAGE))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(message(&body).starts_with("Failed during image analysis step: "));
}

#[tokio::test]
async fn missing_provider_config_is_500_after_input_validation() {
    let app = || app_with_config(base_config().build_unchecked());

    let (status, body) = post_json(app(), "/query", &json!({"text": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("Requires text or image data"));

    let (status, body) = post_json(app(), "/query", &query_body("hi", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        message(&body),
        "Internal Server Error: AI provider configuration missing"
    );
}

#[tokio::test]
async fn identical_requests_are_not_cached() {
    let server = MockServer::start().await;
    vision_call()
        .respond_with(completion("{\"main_window\":\"Finder\"}"))
        .expect(2)
        .mount(&server)
        .await;
    target_call()
        .respond_with(completion("Empty the trash."))
        .expect(2)
        .mount(&server)
        .await;

    let app = app_with_provider(&server);
    let body = query_body("disk full", Some(IMAGE));
    for _ in 0..2 {
        let (status, _) = post_json(app.clone(), "/query", &body).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn non_data_url_image_is_forwarded_to_vision_model() {
    let server = MockServer::start().await;
    vision_call()
        .and(body_partial_json(json!({
            "messages": [{"content": [{"type": "text"}, {"image_url": {"url": "not-a-data-url"}}]}]
        })))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid image"))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        app_with_provider(&server),
        "/query",
        &query_body("hi", Some("not-a-data-url")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "AI Vision Step Failed (400): invalid image");
}
