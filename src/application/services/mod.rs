mod format_validator;
mod grounding_preflight;
mod marker_extractor;
mod prompts;
mod response_sanitizer;
mod session_archiver;
mod transcription_pipeline;
mod transform_engine;

pub use format_validator::{SOFT_WORD_LIMIT, count_words, validate_format};
pub use grounding_preflight::GroundingPreflight;
pub use marker_extractor::extract_markers;
pub use response_sanitizer::{ParseError, parse_structured, strip_fences};
pub use session_archiver::{ArchiveRecord, SessionArchiver, SessionArtifacts};
pub use transcription_pipeline::{TranscriptionError, TranscriptionOutcome, TranscriptionPipeline};
pub use transform_engine::{TransformEngine, TransformError, TransformResult};
