use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the session credentials are persisted between runs.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
}

/// Available credential store backends.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Default)]
#[serde(tag = "type")]
pub enum StoreBackend {
    /// Durable JSON file; the session survives restarts.
    #[serde(rename = "file")]
    File(FileStoreConfig),
    /// Process-lifetime only; every run starts logged out.
    #[serde(rename = "memory")]
    #[default]
    Memory,
}

/// Config for the file-backed credential store.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct FileStoreConfig {
    pub path: String,
}
