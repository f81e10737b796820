use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;

use crate::application::ports::ArchiveStore;
use crate::domain::{ArtifactPath, AudioClip, SessionId};

/// Everything a finished session leaves behind: the uploaded audio, every
/// prompt sent, every raw response received, and the final outputs.
pub struct SessionArtifacts {
    pub audio: Option<AudioClip>,
    pub prompts: Vec<(String, String)>,
    pub raw_responses: Vec<(String, String)>,
    pub outputs: serde_json::Value,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct ArchiveRecord {
    pub enabled: bool,
    pub backend: String,
    pub artifacts: Vec<String>,
}

/// Best-effort persistence of session artifacts. Failures are logged per
/// artifact and reflected in the returned record; nothing propagates to
/// the caller. Artifact keys are prefixed with the session id, so
/// concurrent sessions can never write into each other's container.
pub struct SessionArchiver {
    store: Arc<dyn ArchiveStore>,
}

impl SessionArchiver {
    pub fn new(store: Arc<dyn ArchiveStore>) -> Self {
        Self { store }
    }

    pub async fn archive(&self, session_id: SessionId, artifacts: SessionArtifacts) -> ArchiveRecord {
        let backend = self.store.backend_name().to_string();

        if !self.store.enabled() {
            return ArchiveRecord {
                enabled: false,
                backend,
                artifacts: Vec::new(),
            };
        }

        let mut stored = Vec::new();

        if let Some(audio) = &artifacts.audio {
            self.put(
                session_id,
                &audio.filename,
                audio.data.clone(),
                &audio.mime_type,
                &mut stored,
            )
            .await;
        }

        for (name, text) in &artifacts.prompts {
            self.put(
                session_id,
                name,
                Bytes::from(text.clone()),
                "text/plain",
                &mut stored,
            )
            .await;
        }

        for (name, text) in &artifacts.raw_responses {
            self.put(
                session_id,
                name,
                Bytes::from(text.clone()),
                "text/plain",
                &mut stored,
            )
            .await;
        }

        match serde_json::to_vec_pretty(&artifacts.outputs) {
            Ok(bytes) => {
                self.put(
                    session_id,
                    "outputs.json",
                    Bytes::from(bytes),
                    "application/json",
                    &mut stored,
                )
                .await;
            }
            Err(e) => {
                tracing::error!(session_id = %session_id.as_uuid(), error = %e, "Failed to serialize outputs")
            }
        }

        let mut metadata = artifacts.metadata;
        if let serde_json::Value::Object(map) = &mut metadata {
            map.insert(
                "archived_at".to_string(),
                serde_json::Value::String(Utc::now().to_rfc3339()),
            );
        }

        match serde_json::to_vec_pretty(&metadata) {
            Ok(bytes) => {
                self.put(
                    session_id,
                    "metadata.json",
                    Bytes::from(bytes),
                    "application/json",
                    &mut stored,
                )
                .await;
            }
            Err(e) => {
                tracing::error!(session_id = %session_id.as_uuid(), error = %e, "Failed to serialize metadata")
            }
        }

        tracing::info!(
            session_id = %session_id.as_uuid(),
            backend = %backend,
            artifacts = stored.len(),
            "Session archived"
        );

        ArchiveRecord {
            enabled: true,
            backend,
            artifacts: stored,
        }
    }

    async fn put(
        &self,
        session_id: SessionId,
        name: &str,
        data: Bytes,
        content_type: &str,
        stored: &mut Vec<String>,
    ) {
        let path = ArtifactPath::new(&session_id, name);
        match self.store.put(&path, data, content_type).await {
            Ok(()) => stored.push(name.to_string()),
            Err(e) => {
                tracing::error!(
                    session_id = %session_id.as_uuid(),
                    artifact = name,
                    error = %e,
                    "Failed to archive artifact"
                );
            }
        }
    }
}
