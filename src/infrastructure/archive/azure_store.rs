use std::sync::Arc;

use bytes::Bytes;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::path::Path as StorePath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::application::ports::{ArchiveStore, ArchiveStoreError};
use crate::domain::ArtifactPath;

/// Durable remote backend on Azure blob storage, one virtual directory
/// per session id.
pub struct AzureArchiveStore {
    inner: Arc<dyn ObjectStore>,
}

impl AzureArchiveStore {
    pub fn new(account: &str, access_key: &str, container: &str) -> Result<Self, ArchiveStoreError> {
        let store = MicrosoftAzureBuilder::new()
            .with_account(account)
            .with_access_key(access_key)
            .with_container_name(container)
            .build()
            .map_err(|e| ArchiveStoreError::Misconfigured(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
        })
    }
}

#[async_trait::async_trait]
impl ArchiveStore for AzureArchiveStore {
    async fn put(
        &self,
        path: &ArtifactPath,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), ArchiveStoreError> {
        let store_path = StorePath::from(path.as_str());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&store_path, PutPayload::from(data), options)
            .await
            .map_err(|e| ArchiveStoreError::UploadFailed(e.to_string()))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "azure"
    }
}
