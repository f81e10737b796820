use chrono::{DateTime, Utc};

use super::{SessionId, SessionPhase};

/// One end-to-end transcription request. Scopes every artifact and the
/// grounding context computed for it.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub audio_ref: Option<String>,
    pub phase: SessionPhase,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(audio_ref: Option<String>) -> Self {
        Self {
            id: SessionId::new(),
            audio_ref,
            phase: SessionPhase::Started,
            created_at: Utc::now(),
        }
    }

    /// Terminal phases never transition again.
    pub fn advance(&mut self, phase: SessionPhase) {
        if !self.phase.is_terminal() {
            self.phase = phase;
        }
    }
}
