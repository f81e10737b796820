use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;

use parlance::application::ports::{
    ArchiveStore, ArchiveStoreError, ProviderClient, ProviderError,
};
use parlance::application::services::{SessionArchiver, TransformEngine, TransformError};
use parlance::domain::{ArtifactPath, FormatViolation, TransformKind, TransformRequest};

struct CannedProvider {
    response: String,
    text_calls: AtomicUsize,
}

impl CannedProvider {
    fn returning(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: response.to_string(),
            text_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl ProviderClient for CannedProvider {
    async fn generate_inline(
        &self,
        _data: &[u8],
        _mime_type: &str,
        _prompt: &str,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::ApiRequestFailed("not used".to_string()))
    }

    async fn generate_text(
        &self,
        _prompt: &str,
        _augmented: bool,
    ) -> Result<String, ProviderError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

#[derive(Default)]
struct RecordingStore {
    puts: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl ArchiveStore for RecordingStore {
    async fn put(
        &self,
        path: &ArtifactPath,
        _data: Bytes,
        _content_type: &str,
    ) -> Result<(), ArchiveStoreError> {
        self.puts.lock().unwrap().push(path.as_str().to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

fn engine(
    provider: &Arc<CannedProvider>,
    store: &Arc<RecordingStore>,
) -> TransformEngine<CannedProvider> {
    let archiver = Arc::new(SessionArchiver::new(
        Arc::clone(store) as Arc<dyn ArchiveStore>
    ));
    TransformEngine::new(Arc::clone(provider), archiver)
}

fn request(kind: TransformKind, custom_prompt: Option<&str>) -> TransformRequest {
    TransformRequest {
        source_text: "We shipped the new onboarding flow last week.".to_string(),
        kind,
        custom_prompt: custom_prompt.map(str::to_string),
    }
}

#[tokio::test]
async fn given_empty_custom_prompt_when_transforming_then_fails_before_any_remote_call() {
    let provider = CannedProvider::returning("unused");
    let store = Arc::new(RecordingStore::default());

    let result = engine(&provider, &store)
        .transform(request(TransformKind::Custom, Some("")))
        .await;

    assert!(matches!(result, Err(TransformError::Validation(_))));
    assert_eq!(provider.text_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_whitespace_custom_prompt_when_transforming_then_fails_validation() {
    let provider = CannedProvider::returning("unused");
    let store = Arc::new(RecordingStore::default());

    let result = engine(&provider, &store)
        .transform(request(TransformKind::Custom, Some("   \n\t")))
        .await;

    assert!(matches!(result, Err(TransformError::Validation(_))));
    assert_eq!(provider.text_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_missing_custom_prompt_when_transforming_then_fails_validation() {
    let provider = CannedProvider::returning("unused");
    let store = Arc::new(RecordingStore::default());

    let result = engine(&provider, &store)
        .transform(request(TransformKind::Custom, None))
        .await;

    assert!(matches!(result, Err(TransformError::Validation(_))));
}

#[tokio::test]
async fn given_empty_source_text_when_transforming_then_fails_validation() {
    let provider = CannedProvider::returning("unused");
    let store = Arc::new(RecordingStore::default());

    let result = engine(&provider, &store)
        .transform(TransformRequest {
            source_text: "   ".to_string(),
            kind: TransformKind::Tweet,
            custom_prompt: None,
        })
        .await;

    assert!(matches!(result, Err(TransformError::Validation(_))));
    assert_eq!(provider.text_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_clean_response_when_transforming_then_no_violations_are_reported() {
    let provider = CannedProvider::returning("Shipped the onboarding flow. Feedback welcome!");
    let store = Arc::new(RecordingStore::default());

    let result = engine(&provider, &store)
        .transform(request(TransformKind::Tweet, None))
        .await
        .expect("transform should succeed");

    assert_eq!(result.text, "Shipped the onboarding flow. Feedback welcome!");
    assert!(result.violations.is_empty());
    assert_eq!(result.word_count, 6);
}

#[tokio::test]
async fn given_overlong_response_when_transforming_then_text_is_returned_with_violation() {
    let long = vec!["word"; 150].join(" ");
    let provider = CannedProvider::returning(&long);
    let store = Arc::new(RecordingStore::default());

    let result = engine(&provider, &store)
        .transform(request(TransformKind::Professional, None))
        .await
        .expect("violations never reject the text");

    assert_eq!(result.text, long);
    assert_eq!(result.violations, vec![FormatViolation::WordLimitExceeded]);
    assert_eq!(result.word_count, 150);
    // no auto-retry on violations
    assert_eq!(provider.text_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_fenced_response_when_transforming_then_fences_are_stripped_before_validation() {
    let provider = CannedProvider::returning("```\nA tidy single paragraph.\n```");
    let store = Arc::new(RecordingStore::default());

    let result = engine(&provider, &store)
        .transform(request(TransformKind::Tweet, None))
        .await
        .expect("transform should succeed");

    assert_eq!(result.text, "A tidy single paragraph.");
    assert!(result.violations.is_empty());
}

#[tokio::test]
async fn given_custom_instruction_when_transforming_then_session_is_archived() {
    let provider = CannedProvider::returning("Done as asked.");
    let store = Arc::new(RecordingStore::default());

    let result = engine(&provider, &store)
        .transform(request(TransformKind::Custom, Some("Make it sound like a pirate")))
        .await
        .expect("transform should succeed");

    let prefix = format!("{}/", result.session_id.as_uuid());
    let puts = store.puts.lock().unwrap();

    assert!(puts.iter().all(|key| key.starts_with(&prefix)));
    assert!(puts.iter().any(|key| key.ends_with("/prompt.txt")));
    assert!(puts.iter().any(|key| key.ends_with("/raw_response.txt")));
    assert!(puts.iter().any(|key| key.ends_with("/outputs.json")));
    assert!(result.archive.enabled);
    assert_eq!(result.archive.backend, "recording");
}
