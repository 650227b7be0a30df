use std::time::Duration;

use pretty_assertions::assert_eq;
use revive_engine::{ErrorKind, GeminiRestorer, RestoreRequest, RestoreSettings, Restorer};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

fn settings_for(server: &MockServer) -> RestoreSettings {
    RestoreSettings {
        endpoint: server.uri(),
        ..RestoreSettings::default()
    }
}

fn request() -> RestoreRequest {
    RestoreRequest {
        payload: "/9j/4AAQ".to_string(),
        mime_type: "image/jpeg".to_string(),
        instruction: "Please restore this photo.".to_string(),
    }
}

#[tokio::test]
async fn sends_image_and_instruction_and_returns_image_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": { "parts": [
                { "inlineData": { "data": "/9j/4AAQ", "mimeType": "image/jpeg" } },
                { "text": "Please restore this photo." }
            ]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Restored." },
                { "inlineData": { "mimeType": "image/png", "data": "iVBORw0K" } }
            ]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let restorer = GeminiRestorer::new(settings_for(&server));
    let restored = restorer.restore(&request(), "test-key").await.expect("restore ok");
    assert_eq!(restored.mime_type, "image/png");
    assert_eq!(restored.data, "iVBORw0K");
}

#[tokio::test]
async fn response_without_image_part_is_no_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot do that." }] } }]
        })))
        .mount(&server)
        .await;

    let restorer = GeminiRestorer::new(settings_for(&server));
    let err = restorer.restore(&request(), "k").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoImage);
}

#[tokio::test]
async fn empty_candidates_is_no_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let restorer = GeminiRestorer::new(settings_for(&server));
    let err = restorer.restore(&request(), "k").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoImage);
}

#[tokio::test]
async fn invalid_key_maps_to_credential_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{ "reason": "API_KEY_INVALID" }]
            }
        })))
        .mount(&server)
        .await;

    let restorer = GeminiRestorer::new(settings_for(&server));
    let err = restorer.restore(&request(), "bad").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::CredentialRejected);
    assert_eq!(err.message, "API key not valid. Please pass a valid API key.");
}

#[tokio::test]
async fn forbidden_maps_to_credential_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let restorer = GeminiRestorer::new(settings_for(&server));
    let err = restorer.restore(&request(), "k").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::CredentialRejected);
}

#[tokio::test]
async fn server_error_keeps_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
        })))
        .mount(&server)
        .await;

    let restorer = GeminiRestorer::new(settings_for(&server));
    let err = restorer.restore(&request(), "k").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::HttpStatus(503));
    assert_eq!(err.message, "The model is overloaded.");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let settings = RestoreSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let restorer = GeminiRestorer::new(settings);
    let err = restorer.restore(&request(), "k").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("0123456789ABCDEF"))
        .mount(&server)
        .await;

    let settings = RestoreSettings {
        max_response_bytes: 10,
        ..settings_for(&server)
    };
    let restorer = GeminiRestorer::new(settings);
    let err = restorer.restore(&request(), "k").await.unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::TooLarge {
            max_bytes: 10,
            actual: Some(16)
        }
    );
}

#[tokio::test]
async fn malformed_endpoint_is_reported() {
    let settings = RestoreSettings {
        endpoint: "not a url".to_string(),
        ..RestoreSettings::default()
    };
    let restorer = GeminiRestorer::new(settings);
    let err = restorer.restore(&request(), "k").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidEndpoint);
}

#[tokio::test]
async fn data_url_prefix_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "contents": { "parts": [
                { "inlineData": { "data": "/9j/4AAQ", "mimeType": "image/jpeg" } },
                { "text": "Please restore this photo." }
            ]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "iVBORw0K" } }
            ]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prefixed = RestoreRequest {
        payload: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
        ..request()
    };
    let restorer = GeminiRestorer::new(settings_for(&server));
    assert!(restorer.restore(&prefixed, "k").await.is_ok());
}
