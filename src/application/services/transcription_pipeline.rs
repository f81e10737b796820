use std::sync::Arc;

use serde_json::json;

use crate::application::ports::{ProviderClient, ProviderError};
use crate::domain::{
    AudioClip, GroundingResult, Session, SessionId, SessionPhase, TranscriptVariantSet,
};

use super::grounding_preflight::GroundingPreflight;
use super::prompts;
use super::response_sanitizer::{ParseError, parse_structured, strip_fences};
use super::session_archiver::{ArchiveRecord, SessionArchiver, SessionArtifacts};

/// Drives one transcription session: optional grounding preflight, the
/// strict transcript request, two independent light-edit passes, and the
/// archival hand-off.
///
/// The strict stage is all-or-nothing: a provider or parse failure there
/// fails the whole session and no variant set is returned. The light-edit
/// stage is best-effort: a failed pass degrades its slot to the strict
/// text and the session still completes.
pub struct TranscriptionPipeline<P>
where
    P: ProviderClient,
{
    provider: Arc<P>,
    grounding: GroundingPreflight<P>,
    archiver: Arc<SessionArchiver>,
    grounding_enabled: bool,
    strict_retry_attempts: u32,
}

pub struct TranscriptionOutcome {
    pub session_id: SessionId,
    pub variants: TranscriptVariantSet,
    pub grounding: Option<GroundingResult>,
    pub archive: ArchiveRecord,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),
    #[error("parse: {0}")]
    Parse(#[from] ParseError),
    #[error("strict response missing field: {0}")]
    MissingField(&'static str),
}

struct LightEditOutcome {
    text: String,
    prompt: String,
    raw_response: Option<String>,
    degraded: bool,
}

impl<P> TranscriptionPipeline<P>
where
    P: ProviderClient,
{
    pub fn new(
        provider: Arc<P>,
        archiver: Arc<SessionArchiver>,
        grounding_enabled: bool,
        grounding_max_terms: usize,
        strict_retry_attempts: u32,
    ) -> Self {
        Self {
            grounding: GroundingPreflight::new(Arc::clone(&provider), grounding_max_terms),
            provider,
            archiver,
            grounding_enabled,
            strict_retry_attempts,
        }
    }

    pub async fn transcribe(
        &self,
        clip: AudioClip,
        vocabulary_hint: Option<&str>,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        let mut session = Session::new(Some(clip.filename.clone()));

        tracing::info!(
            session_id = %session.id.as_uuid(),
            filename = %clip.filename,
            mime_type = %clip.mime_type,
            bytes = clip.size_bytes(),
            "Transcription session started"
        );

        let base_prompt = prompts::strict_transcription_prompt(vocabulary_hint);

        // The one mandatory ordering point: grounding must resolve (or be
        // skipped) before any prompt that depends on its context text.
        let grounding = if self.grounding_enabled {
            let terms = self.grounding.extract_terms(&base_prompt);
            if terms.is_empty() {
                None
            } else {
                Some(self.grounding.run_preflight(terms).await)
            }
        } else {
            None
        };

        let grounded = grounding.as_ref().filter(|g| g.has_context());

        let strict_prompt = match grounded {
            Some(g) => prompts::with_grounding_context(&base_prompt, &g.context_text),
            None => base_prompt,
        };

        let raw_strict = match self.request_strict(&clip, &strict_prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                session.advance(SessionPhase::Failed);
                tracing::error!(
                    session_id = %session.id.as_uuid(),
                    phase = %session.phase,
                    error = %e,
                    "Strict transcription failed, session aborted"
                );
                return Err(e.into());
            }
        };

        let (original_strict, english_strict) = match parse_strict_variants(&raw_strict) {
            Ok(pair) => pair,
            Err(e) => {
                session.advance(SessionPhase::Failed);
                tracing::error!(
                    session_id = %session.id.as_uuid(),
                    phase = %session.phase,
                    error = %e,
                    "Strict response unusable, session aborted"
                );
                return Err(e);
            }
        };

        session.advance(SessionPhase::StrictDone);
        session.advance(SessionPhase::LightEditing);

        // The two light-edit passes are independent; run them concurrently.
        let (original_edit, english_edit) = tokio::join!(
            self.light_edit(&session, "original", &original_strict, grounded),
            self.light_edit(&session, "english", &english_strict, grounded),
        );

        let variants = TranscriptVariantSet {
            original_strict,
            original_light: original_edit.text.clone(),
            english_strict,
            english_light: english_edit.text.clone(),
        };

        session.advance(SessionPhase::Complete);
        tracing::info!(
            session_id = %session.id.as_uuid(),
            original_degraded = original_edit.degraded,
            english_degraded = english_edit.degraded,
            "Transcription session completed"
        );

        let mut prompt_artifacts = vec![
            ("strict_prompt.txt".to_string(), strict_prompt),
            (
                "light_original_prompt.txt".to_string(),
                original_edit.prompt,
            ),
            ("light_english_prompt.txt".to_string(), english_edit.prompt),
        ];
        if let Some(g) = grounded {
            prompt_artifacts.push(("grounding_context.txt".to_string(), g.context_text.clone()));
        }

        let mut raw_responses = vec![("strict_response.txt".to_string(), raw_strict)];
        if let Some(raw) = original_edit.raw_response {
            raw_responses.push(("light_original_response.txt".to_string(), raw));
        }
        if let Some(raw) = english_edit.raw_response {
            raw_responses.push(("light_english_response.txt".to_string(), raw));
        }

        let outputs = json!({
            "original_strict": variants.original_strict,
            "original_light": variants.original_light,
            "english_strict": variants.english_strict,
            "english_light": variants.english_light,
        });

        let metadata = json!({
            "session_id": session.id.as_uuid().to_string(),
            "created_at": session.created_at.to_rfc3339(),
            "phase": session.phase.as_str(),
            "filename": clip.filename,
            "mime_type": clip.mime_type,
            "audio_bytes": clip.size_bytes(),
            "grounding_success": grounding.as_ref().map(|g| g.success),
            "grounding_terms": grounding.as_ref().map(|g| g.terms.clone()),
            "original_light_degraded": original_edit.degraded,
            "english_light_degraded": english_edit.degraded,
        });

        let archive = self
            .archiver
            .archive(
                session.id,
                SessionArtifacts {
                    audio: Some(clip),
                    prompts: prompt_artifacts,
                    raw_responses,
                    outputs,
                    metadata,
                },
            )
            .await;

        Ok(TranscriptionOutcome {
            session_id: session.id,
            variants,
            grounding,
            archive,
        })
    }

    /// Bounded, idempotent retry around the single fatal provider call.
    async fn request_strict(
        &self,
        clip: &AudioClip,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let mut attempt: u32 = 0;
        loop {
            match self
                .provider
                .generate_inline(&clip.data, &clip.mime_type, prompt)
                .await
            {
                Ok(raw) => return Ok(raw),
                Err(e) if attempt < self.strict_retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        error = %e,
                        "Strict transcription call failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn light_edit(
        &self,
        session: &Session,
        slot: &str,
        strict_text: &str,
        grounding: Option<&GroundingResult>,
    ) -> LightEditOutcome {
        let mut prompt = prompts::light_edit_prompt(strict_text);
        if let Some(g) = grounding {
            prompt = prompts::with_grounding_context(&prompt, &g.context_text);
        }

        match self.provider.generate_text(&prompt, false).await {
            Ok(raw) => {
                let edited = strip_fences(&raw);
                if edited.is_empty() {
                    tracing::warn!(
                        session_id = %session.id.as_uuid(),
                        slot,
                        "Light edit returned no text, falling back to strict variant"
                    );
                    LightEditOutcome {
                        text: strict_text.to_string(),
                        prompt,
                        raw_response: Some(raw),
                        degraded: true,
                    }
                } else {
                    LightEditOutcome {
                        text: edited,
                        prompt,
                        raw_response: Some(raw),
                        degraded: false,
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session.id.as_uuid(),
                    slot,
                    error = %e,
                    "Light edit call failed, falling back to strict variant"
                );
                LightEditOutcome {
                    text: strict_text.to_string(),
                    prompt,
                    raw_response: None,
                    degraded: true,
                }
            }
        }
    }
}

fn parse_strict_variants(raw: &str) -> Result<(String, String), TranscriptionError> {
    let value = parse_structured(&strip_fences(raw))?;

    let original = value
        .get("original")
        .and_then(|v| v.as_str())
        .ok_or(TranscriptionError::MissingField("original"))?;

    let english = value
        .get("english")
        .and_then(|v| v.as_str())
        .ok_or(TranscriptionError::MissingField("english"))?;

    Ok((original.to_string(), english.to_string()))
}
