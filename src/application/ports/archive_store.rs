use bytes::Bytes;

use crate::domain::ArtifactPath;

/// Write-only put-by-key persistence contract for session artifacts.
/// The core never reads archived data back.
#[async_trait::async_trait]
pub trait ArchiveStore: Send + Sync {
    async fn put(
        &self,
        path: &ArtifactPath,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), ArchiveStoreError>;

    fn backend_name(&self) -> &'static str;

    fn enabled(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("backend misconfigured: {0}")]
    Misconfigured(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
