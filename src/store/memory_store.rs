use std::sync::RwLock;

use async_trait::async_trait;

use super::CredentialStore;
use crate::models::StoredCredentials;

/// A process-lifetime store. Useful for tests and for operators who prefer
/// logging in on every run.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Option<StoredCredentials>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn load(&self) -> Result<Option<StoredCredentials>, String> {
        Ok(self
            .inner
            .read()
            .map_err(|_| "credential lock poisoned".to_string())?
            .clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<(), String> {
        *self
            .inner
            .write()
            .map_err(|_| "credential lock poisoned".to_string())? = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        *self
            .inner
            .write()
            .map_err(|_| "credential lock poisoned".to_string())? = None;
        Ok(())
    }
}
