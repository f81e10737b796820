use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use parlance::application::ports::{ProviderClient, ProviderError};
use parlance::application::services::{SessionArchiver, TranscriptionPipeline, TransformEngine};
use parlance::infrastructure::archive::NullArchiveStore;
use parlance::presentation::{AppState, create_router};

const BOUNDARY: &str = "parlance-test-boundary";

struct MockProvider {
    text_calls: AtomicUsize,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            text_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl ProviderClient for MockProvider {
    async fn generate_inline(
        &self,
        _data: &[u8],
        _mime_type: &str,
        _prompt: &str,
    ) -> Result<String, ProviderError> {
        Ok(
            "```json\n{\"original\": \"um hello there\", \"english\": \"um hello there\"}\n```"
                .to_string(),
        )
    }

    async fn generate_text(
        &self,
        _prompt: &str,
        _augmented: bool,
    ) -> Result<String, ProviderError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        Ok("hello there".to_string())
    }
}

struct FailingProvider;

#[async_trait::async_trait]
impl ProviderClient for FailingProvider {
    async fn generate_inline(
        &self,
        _data: &[u8],
        _mime_type: &str,
        _prompt: &str,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::ApiRequestFailed("provider down".to_string()))
    }

    async fn generate_text(
        &self,
        _prompt: &str,
        _augmented: bool,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::ApiRequestFailed("provider down".to_string()))
    }
}

fn app_with<P>(provider: Arc<P>) -> axum::Router
where
    P: ProviderClient + 'static,
{
    let archiver = Arc::new(SessionArchiver::new(Arc::new(NullArchiveStore)));

    let transcription_pipeline = Arc::new(TranscriptionPipeline::new(
        Arc::clone(&provider),
        Arc::clone(&archiver),
        false,
        8,
        0,
    ));
    let transform_engine = Arc::new(TransformEngine::new(provider, archiver));

    create_router(AppState {
        transcription_pipeline,
        transform_engine,
    })
}

fn create_test_app() -> axum::Router {
    app_with(Arc::new(MockProvider::new()))
}

fn create_failing_app() -> axum::Router {
    app_with(Arc::new(FailingProvider))
}

fn multipart_audio_body() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"audio\"; filename=\"clip.m4a\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: audio/m4a\r\n\r\n");
    body.extend_from_slice(b"fake audio bytes");
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn multipart_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/transcribe")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn given_audio_upload_when_transcribing_then_returns_all_four_variants() {
    let app = create_test_app();

    let response = app
        .oneshot(multipart_request(multipart_audio_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["originalStrict"], "um hello there");
    assert_eq!(json["originalLight"], "hello there");
    assert_eq!(json["englishStrict"], "um hello there");
    assert_eq!(json["englishLight"], "hello there");
    assert!(json["sessionId"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(json["archive"]["enabled"], false);
}

#[tokio::test]
async fn given_multipart_without_audio_when_transcribing_then_returns_bad_request() {
    let app = create_test_app();

    let empty = format!("--{}--\r\n", BOUNDARY).into_bytes();
    let response = app.oneshot(multipart_request(empty)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_failing_provider_when_transcribing_then_returns_bad_gateway() {
    let app = create_failing_app();

    let response = app
        .oneshot(multipart_request(multipart_audio_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = response_json(response).await;
    assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn given_tweet_request_when_transforming_then_returns_text_and_violations() {
    let app = create_test_app();

    let request_body = r#"{
        "sourceText": "We shipped the new onboarding flow last week.",
        "kind": "tweet"
    }"#;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/transform")
                .header("content-type", "application/json")
                .body(Body::from(request_body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["text"], "hello there");
    assert_eq!(json["wordCount"], 2);
    assert_eq!(json["violations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn given_custom_kind_with_empty_prompt_when_transforming_then_bad_request_and_no_remote_call()
{
    let provider = Arc::new(MockProvider::new());
    let app = app_with(Arc::clone(&provider));

    let request_body = r#"{
        "sourceText": "Some text",
        "kind": "custom",
        "customPrompt": ""
    }"#;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/transform")
                .header("content-type", "application/json")
                .body(Body::from(request_body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.text_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_unknown_kind_when_transforming_then_returns_bad_request() {
    let app = create_test_app();

    let request_body = r#"{
        "sourceText": "Some text",
        "kind": "haiku"
    }"#;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/transform")
                .header("content-type", "application/json")
                .body(Body::from(request_body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_failing_provider_when_transforming_then_returns_bad_gateway() {
    let app = create_failing_app();

    let request_body = r#"{
        "sourceText": "Some text",
        "kind": "professional"
    }"#;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/transform")
                .header("content-type", "application/json")
                .body(Body::from(request_body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn given_request_without_id_when_any_endpoint_then_response_contains_request_id() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn given_request_with_id_when_any_endpoint_then_response_echoes_request_id() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "test-request-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-request-123"
    );
}
