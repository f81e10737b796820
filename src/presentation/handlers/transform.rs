use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::ProviderClient;
use crate::application::services::TransformError;
use crate::domain::{FormatViolation, TransformKind, TransformRequest};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequestBody {
    pub source_text: String,
    pub kind: String,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResponse {
    pub session_id: String,
    pub text: String,
    pub violations: Vec<String>,
    pub word_count: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, body), fields(kind = %body.kind))]
pub async fn transform_handler<P>(
    State(state): State<AppState<P>>,
    Json(body): Json<TransformRequestBody>,
) -> impl IntoResponse
where
    P: ProviderClient + 'static,
{
    tracing::debug!(
        source = %sanitize_prompt(&body.source_text),
        "Processing transform request"
    );

    let kind = match TransformKind::from_str(&body.kind) {
        Ok(kind) => kind,
        Err(e) => {
            tracing::warn!(kind = %body.kind, "Unknown transform kind");
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response();
        }
    };

    let request = TransformRequest {
        source_text: body.source_text,
        kind,
        custom_prompt: body.custom_prompt,
    };

    match state.transform_engine.transform(request).await {
        Ok(result) => {
            tracing::info!(
                session_id = %result.session_id.as_uuid(),
                violations = result.violations.len(),
                word_count = result.word_count,
                "Transform successful"
            );
            (
                StatusCode::OK,
                Json(TransformResponse {
                    session_id: result.session_id.as_uuid().to_string(),
                    text: result.text,
                    violations: result
                        .violations
                        .iter()
                        .map(|v| FormatViolation::as_str(v).to_string())
                        .collect(),
                    word_count: result.word_count,
                }),
            )
                .into_response()
        }
        Err(TransformError::Validation(message)) => {
            tracing::warn!(error = %message, "Transform request rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Transform failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Transform failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
