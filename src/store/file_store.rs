use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::CredentialStore;
use crate::models::StoredCredentials;

/// Durable credential store backed by a small JSON file, so a login survives
/// page-reload equivalents (new invocations of the console).
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }
}

#[async_trait]
impl CredentialStore for FileStore {
    async fn load(&self) -> Result<Option<StoredCredentials>, String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("failed to read '{}': {}", self.path.display(), e)),
        };
        let credentials: StoredCredentials = serde_json::from_str(&raw)
            .map_err(|e| format!("malformed credential file '{}': {}", self.path.display(), e))?;
        Ok(Some(credentials))
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("failed to create '{}': {}", parent.display(), e))?;
        }
        let raw = serde_json::to_string_pretty(credentials)
            .map_err(|e| format!("failed to serialize credentials: {}", e))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| format!("failed to write '{}': {}", self.path.display(), e))?;
        debug!("Persisted credentials to '{}'", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!(
                "failed to remove '{}': {}",
                self.path.display(),
                e
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> StoredCredentials {
        StoredCredentials {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
        }
    }

    /// Test that credentials survive a save/load cycle on disk.
    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("credentials.json"));
        assert_eq!(store.load().await.unwrap(), None);
        store.save(&credentials()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(credentials()));
    }

    /// Test that save creates missing parent directories.
    #[tokio::test]
    async fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("nested/dir/credentials.json"));
        store.save(&credentials()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(credentials()));
    }

    /// Test that clearing a never-written store succeeds.
    #[tokio::test]
    async fn test_file_store_clear_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("credentials.json"));
        store.clear().await.unwrap();
        store.save(&credentials()).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    /// Test that a corrupt credential file surfaces an error rather than
    /// silently logging the operator out.
    #[tokio::test]
    async fn test_file_store_malformed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("credentials.json");
        tokio::fs::write(&path, "not json").await.unwrap();
        let store = FileStore::new(path);
        assert!(store.load().await.is_err());
    }
}
