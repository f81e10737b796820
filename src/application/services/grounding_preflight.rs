use std::sync::Arc;

use crate::application::ports::ProviderClient;
use crate::domain::{GroundingMetadata, GroundingResult};

use super::marker_extractor::extract_markers;
use super::prompts;
use super::response_sanitizer::{parse_structured, strip_fences};

/// Resolves `[[term]]` lookup markers into background context before the
/// main generation call. Never fails the enclosing session: every error
/// path degrades to an unsuccessful result with empty context.
pub struct GroundingPreflight<P>
where
    P: ProviderClient,
{
    provider: Arc<P>,
    max_terms: usize,
}

impl<P> GroundingPreflight<P>
where
    P: ProviderClient,
{
    pub fn new(provider: Arc<P>, max_terms: usize) -> Self {
        Self {
            provider,
            max_terms,
        }
    }

    pub fn extract_terms(&self, prompt: &str) -> Vec<String> {
        extract_markers(prompt, self.max_terms)
    }

    /// Issues at most one augmented provider call. An empty term list
    /// short-circuits to a no-op result with zero remote calls.
    pub async fn run_preflight(&self, terms: Vec<String>) -> GroundingResult {
        if terms.is_empty() {
            return GroundingResult::skipped();
        }

        let prompt = prompts::grounding_lookup_prompt(&terms);

        let raw = match self.provider.generate_text(&prompt, true).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, terms = terms.len(), "Grounding lookup failed, continuing ungrounded");
                return GroundingResult::failed(terms);
            }
        };

        let parsed = match parse_structured(&strip_fences(&raw)) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Grounding response unparseable, continuing ungrounded");
                return GroundingResult::failed(terms);
            }
        };

        let summary = parsed
            .get("summary")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        if summary.is_empty() {
            tracing::warn!("Grounding response carried no summary, continuing ungrounded");
            return GroundingResult::failed(terms);
        }

        let source_count = parsed
            .get("sources")
            .and_then(|v| v.as_array())
            .map(|sources| sources.len())
            .unwrap_or(0);

        tracing::info!(
            terms = terms.len(),
            source_count,
            context_chars = summary.len(),
            "Grounding preflight completed"
        );

        GroundingResult {
            terms,
            context_text: summary,
            success: true,
            metadata: GroundingMetadata {
                source_count,
                augmented: true,
            },
        }
    }
}
