use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ArchiveStore, ArchiveStoreError};
use crate::domain::ArtifactPath;

/// Ephemeral-local backend writing session containers under a base
/// directory. The local filesystem ignores content types.
pub struct LocalArchiveStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalArchiveStore {
    pub fn new(base_path: PathBuf) -> Result<Self, ArchiveStoreError> {
        std::fs::create_dir_all(&base_path).map_err(ArchiveStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ArchiveStoreError::Misconfigured(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl ArchiveStore for LocalArchiveStore {
    async fn put(
        &self,
        path: &ArtifactPath,
        data: Bytes,
        _content_type: &str,
    ) -> Result<(), ArchiveStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| ArchiveStoreError::UploadFailed(e.to_string()))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
