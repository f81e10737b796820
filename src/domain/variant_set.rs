/// The four transcript variants produced by a completed session.
///
/// Constructed only as a whole: a session that cannot fill all four slots
/// fails instead of exposing a partial set. A light variant equal to its
/// strict counterpart is a valid, degraded-but-successful outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptVariantSet {
    pub original_strict: String,
    pub original_light: String,
    pub english_strict: String,
    pub english_light: String,
}
