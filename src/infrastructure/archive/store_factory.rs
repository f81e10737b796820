use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{ArchiveStore, ArchiveStoreError};
use crate::presentation::config::{ArchiveBackendSetting, ArchiveSettings};

use super::azure_store::AzureArchiveStore;
use super::local_store::LocalArchiveStore;
use super::null_store::NullArchiveStore;

pub struct ArchiveStoreFactory;

impl ArchiveStoreFactory {
    pub fn create(settings: &ArchiveSettings) -> Result<Arc<dyn ArchiveStore>, ArchiveStoreError> {
        match settings.backend {
            ArchiveBackendSetting::None => Ok(Arc::new(NullArchiveStore)),
            ArchiveBackendSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                let store = LocalArchiveStore::new(path)?;
                Ok(Arc::new(store))
            }
            ArchiveBackendSetting::Azure => {
                let account = settings.azure_account.as_deref().ok_or_else(|| {
                    ArchiveStoreError::Misconfigured("azure_account required".into())
                })?;
                let key = settings.azure_access_key.as_deref().ok_or_else(|| {
                    ArchiveStoreError::Misconfigured("azure_access_key required".into())
                })?;
                let container = settings.azure_container.as_deref().ok_or_else(|| {
                    ArchiveStoreError::Misconfigured("azure_container required".into())
                })?;
                let store = AzureArchiveStore::new(account, key, container)?;
                Ok(Arc::new(store))
            }
        }
    }
}
