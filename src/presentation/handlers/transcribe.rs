use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::ProviderClient;
use crate::application::services::TranscriptionOutcome;
use crate::domain::AudioClip;
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub session_id: String,
    pub original_strict: String,
    pub original_light: String,
    pub english_strict: String,
    pub english_light: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding: Option<GroundingSummary>,
    pub archive: ArchiveSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingSummary {
    pub success: bool,
    pub terms: Vec<String>,
    pub source_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveSummary {
    pub enabled: bool,
    pub backend: String,
    pub artifacts: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<P>(
    State(state): State<AppState<P>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    P: ProviderClient + 'static,
{
    let mut clip: Option<AudioClip> = None;
    let mut vocabulary: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        let is_vocabulary = field.name() == Some("vocabulary");

        if is_vocabulary {
            vocabulary = match field.text().await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read vocabulary field");
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse {
                            error: format!("Failed to read vocabulary field: {}", e),
                        }),
                    )
                        .into_response();
                }
            };
        } else {
            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);

            let data = match field.bytes().await {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read audio bytes");
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse {
                            error: format!("Failed to read audio: {}", e),
                        }),
                    )
                        .into_response();
                }
            };

            clip = Some(AudioClip::new(filename, content_type, data));
        }
    }

    let Some(clip) = clip else {
        tracing::warn!("Transcribe request with no audio");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No audio uploaded".to_string(),
            }),
        )
            .into_response();
    };

    if clip.data.is_empty() {
        tracing::warn!("Transcribe request with empty audio payload");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Empty audio upload".to_string(),
            }),
        )
            .into_response();
    }

    tracing::debug!(
        filename = %clip.filename,
        bytes = clip.size_bytes(),
        has_vocabulary = vocabulary.is_some(),
        "Audio received"
    );

    match state
        .transcription_pipeline
        .transcribe(clip, vocabulary.as_deref())
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(to_response(outcome))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

fn to_response(outcome: TranscriptionOutcome) -> TranscribeResponse {
    TranscribeResponse {
        session_id: outcome.session_id.as_uuid().to_string(),
        original_strict: outcome.variants.original_strict,
        original_light: outcome.variants.original_light,
        english_strict: outcome.variants.english_strict,
        english_light: outcome.variants.english_light,
        grounding: outcome.grounding.map(|g| GroundingSummary {
            success: g.success,
            terms: g.terms,
            source_count: g.metadata.source_count,
        }),
        archive: ArchiveSummary {
            enabled: outcome.archive.enabled,
            backend: outcome.archive.backend,
            artifacts: outcome.archive.artifacts,
        },
    }
}
