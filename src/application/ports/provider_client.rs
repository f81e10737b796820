use async_trait::async_trait;

/// The single seam through which every remote generation call passes.
/// Both methods are one blocking remote call with no internal retry;
/// callers decide retry policy.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Generation request carrying a binary payload plus a text prompt.
    async fn generate_inline(
        &self,
        data: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, ProviderError>;

    /// Text-only generation request. `augmented` asks the provider to
    /// consult its search tool while answering.
    async fn generate_text(&self, prompt: &str, augmented: bool) -> Result<String, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
