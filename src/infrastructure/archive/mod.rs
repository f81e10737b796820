mod azure_store;
mod local_store;
mod null_store;
mod store_factory;

pub use azure_store::AzureArchiveStore;
pub use local_store::LocalArchiveStore;
pub use null_store::NullArchiveStore;
pub use store_factory::ArchiveStoreFactory;
