mod archive_store;
mod provider_client;

pub use archive_store::{ArchiveStore, ArchiveStoreError};
pub use provider_client::{ProviderClient, ProviderError};
