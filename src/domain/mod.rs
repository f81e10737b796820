mod artifact_path;
mod audio_clip;
mod grounding;
mod session;
mod session_id;
mod session_phase;
mod transform;
mod variant_set;

pub use artifact_path::ArtifactPath;
pub use audio_clip::AudioClip;
pub use grounding::{GroundingMetadata, GroundingResult};
pub use session::Session;
pub use session_id::SessionId;
pub use session_phase::SessionPhase;
pub use transform::{FormatViolation, TransformKind, TransformRequest};
pub use variant_set::TranscriptVariantSet;
