use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ProviderClient, ProviderError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// `generateContent` client for the generative-language API. One remote
/// call per method, no internal retry; the caller owns retry policy.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            model,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    async fn generate(&self, parts: Vec<Part>, augmented: bool) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            tools: augmented.then(|| {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            }),
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(feedback) = payload.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                return Err(ProviderError::InvalidResponse(format!(
                    "request blocked: {}",
                    reason
                )));
            }
        }

        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::InvalidResponse(
                "empty candidates".to_string(),
            ));
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    async fn generate_inline(
        &self,
        data: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        tracing::debug!(
            model = %self.model,
            mime_type,
            bytes = data.len(),
            "Sending inline generation request"
        );

        let parts = vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.to_string(),
                    data: general_purpose::STANDARD.encode(data),
                },
            },
            Part::Text {
                text: prompt.to_string(),
            },
        ];

        self.generate(parts, false).await
    }

    async fn generate_text(&self, prompt: &str, augmented: bool) -> Result<String, ProviderError> {
        tracing::debug!(
            model = %self.model,
            augmented,
            prompt_chars = prompt.len(),
            "Sending text generation request"
        );

        self.generate(
            vec![Part::Text {
                text: prompt.to_string(),
            }],
            augmented,
        )
        .await
    }
}
