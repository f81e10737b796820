use std::sync::Arc;

use serde_json::json;

use crate::application::ports::{ProviderClient, ProviderError};
use crate::domain::{FormatViolation, SessionId, TransformKind, TransformRequest};

use super::format_validator::{count_words, validate_format};
use super::prompts;
use super::response_sanitizer::strip_fences;
use super::session_archiver::{ArchiveRecord, SessionArchiver, SessionArtifacts};

/// Single-shot rewrites through the soft-constraint scaffold. The
/// formatting validator reports violations but never rejects: the text
/// comes back regardless, with the codes attached as metadata.
pub struct TransformEngine<P>
where
    P: ProviderClient,
{
    provider: Arc<P>,
    archiver: Arc<SessionArchiver>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub session_id: SessionId,
    pub text: String,
    pub violations: Vec<FormatViolation>,
    pub word_count: usize,
    pub archive: ArchiveRecord,
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),
}

impl<P> TransformEngine<P>
where
    P: ProviderClient,
{
    pub fn new(provider: Arc<P>, archiver: Arc<SessionArchiver>) -> Self {
        Self { provider, archiver }
    }

    pub async fn transform(
        &self,
        request: TransformRequest,
    ) -> Result<TransformResult, TransformError> {
        // Input validation happens before any remote call.
        if request.source_text.trim().is_empty() {
            return Err(TransformError::Validation(
                "source_text must not be empty".to_string(),
            ));
        }

        let instruction = match request.kind {
            TransformKind::Custom => {
                let custom = request
                    .custom_prompt
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default();
                if custom.is_empty() {
                    return Err(TransformError::Validation(
                        "custom transform requires a non-empty custom_prompt".to_string(),
                    ));
                }
                custom.to_string()
            }
            kind => match prompts::builtin_style_instruction(kind) {
                Some(instruction) => instruction.to_string(),
                None => {
                    return Err(TransformError::Validation(format!(
                        "no instruction defined for kind {}",
                        kind
                    )));
                }
            },
        };

        let session_id = SessionId::new();
        let prompt = prompts::transform_prompt(&instruction, &request.source_text);

        tracing::info!(
            session_id = %session_id.as_uuid(),
            kind = %request.kind,
            source_chars = request.source_text.len(),
            "Transform session started"
        );

        let raw = self.provider.generate_text(&prompt, false).await?;

        let text = strip_fences(&raw);
        let violations = validate_format(&text);
        let word_count = count_words(&text);

        if !violations.is_empty() {
            let codes: Vec<&str> = violations.iter().map(FormatViolation::as_str).collect();
            tracing::info!(
                session_id = %session_id.as_uuid(),
                violations = ?codes,
                word_count,
                "Soft constraint violations reported"
            );
        }

        let outputs = json!({
            "text": text,
            "violations": violations.iter().map(FormatViolation::as_str).collect::<Vec<_>>(),
            "word_count": word_count,
        });

        let metadata = json!({
            "session_id": session_id.as_uuid().to_string(),
            "kind": request.kind.as_str(),
            "source_chars": request.source_text.len(),
            "word_count": word_count,
        });

        let archive = self
            .archiver
            .archive(
                session_id,
                SessionArtifacts {
                    audio: None,
                    prompts: vec![("prompt.txt".to_string(), prompt)],
                    raw_responses: vec![("raw_response.txt".to_string(), raw)],
                    outputs,
                    metadata,
                },
            )
            .await;

        Ok(TransformResult {
            session_id,
            text,
            violations,
            word_count,
            archive,
        })
    }
}
