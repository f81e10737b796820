use std::fmt;
use std::str::FromStr;

/// Rewrite style requested by the caller. Custom carries its instruction
/// in `TransformRequest::custom_prompt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Tweet,
    Professional,
    Custom,
}

impl TransformKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::Tweet => "tweet",
            TransformKind::Professional => "professional",
            TransformKind::Custom => "custom",
        }
    }
}

impl FromStr for TransformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tweet" => Ok(TransformKind::Tweet),
            "professional" => Ok(TransformKind::Professional),
            "custom" => Ok(TransformKind::Custom),
            _ => Err(format!("Invalid transform kind: {}", s)),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub source_text: String,
    pub kind: TransformKind,
    pub custom_prompt: Option<String>,
}

/// Soft-constraint violation codes reported on a rewrite. Advisory only:
/// the text is returned regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatViolation {
    WordLimitExceeded,
    MultipleParagraphsDetected,
    ListFormattingDetected,
}

impl FormatViolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatViolation::WordLimitExceeded => "word_limit_exceeded",
            FormatViolation::MultipleParagraphsDetected => "multiple_paragraphs_detected",
            FormatViolation::ListFormattingDetected => "list_formatting_detected",
        }
    }
}
