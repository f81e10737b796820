/// Background context looked up before generation. Computed at most once
/// per session and reused verbatim for every subsequent prompt in that
/// session.
#[derive(Debug, Clone)]
pub struct GroundingResult {
    pub terms: Vec<String>,
    pub context_text: String,
    pub success: bool,
    pub metadata: GroundingMetadata,
}

#[derive(Debug, Clone, Default)]
pub struct GroundingMetadata {
    pub source_count: usize,
    pub augmented: bool,
}

impl GroundingResult {
    /// Neutral no-op result for a session with nothing to look up.
    pub fn skipped() -> Self {
        Self {
            terms: Vec::new(),
            context_text: String::new(),
            success: false,
            metadata: GroundingMetadata::default(),
        }
    }

    /// Unsuccessful result after a failed lookup. Keeps the terms for
    /// diagnostics but carries no context text.
    pub fn failed(terms: Vec<String>) -> Self {
        Self {
            terms,
            context_text: String::new(),
            success: false,
            metadata: GroundingMetadata {
                source_count: 0,
                augmented: true,
            },
        }
    }

    pub fn has_context(&self) -> bool {
        self.success && !self.context_text.is_empty()
    }
}
