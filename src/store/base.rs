use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::{StoreBackend, StoreConfig};
use crate::models::StoredCredentials;

/// The CredentialStore trait abstracts persistence of the session's token
/// pair (load, save, clear). It is the analogue of the browser's durable
/// storage in the original console: two string values keyed by fixed names.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the persisted credentials, or `None` when logged out.
    async fn load(&self) -> Result<Option<StoredCredentials>, String>;
    async fn save(&self, credentials: &StoredCredentials) -> Result<(), String>;
    /// Removing already-absent credentials is not an error.
    async fn clear(&self) -> Result<(), String>;
}

/// Creates a concrete store implementation based on the StoreConfig.
pub fn create_store(config: &StoreConfig) -> Arc<dyn CredentialStore> {
    match &config.backend {
        StoreBackend::File(file_config) => {
            info!("Using file credential store at '{}'", file_config.path);
            Arc::new(FileStore::new(&file_config.path))
        }
        StoreBackend::Memory => {
            info!("Using in-memory credential store; session will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    }
}
