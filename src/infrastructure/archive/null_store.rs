use bytes::Bytes;

use crate::application::ports::{ArchiveStore, ArchiveStoreError};
use crate::domain::ArtifactPath;

/// No-op backend for deployments with archiving disabled.
pub struct NullArchiveStore;

#[async_trait::async_trait]
impl ArchiveStore for NullArchiveStore {
    async fn put(
        &self,
        _path: &ArtifactPath,
        _data: Bytes,
        _content_type: &str,
    ) -> Result<(), ArchiveStoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "none"
    }

    fn enabled(&self) -> bool {
        false
    }
}
