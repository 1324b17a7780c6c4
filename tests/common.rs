use std::sync::Arc;

use remitdesk::client::ApiClient;
use remitdesk::config::ApiConfig;
use remitdesk::models::StoredCredentials;
use remitdesk::session::SessionManager;
use remitdesk::store::{CredentialStore, MemoryStore};

pub fn build_client(base_url: &str) -> (Arc<ApiClient>, Arc<dyn CredentialStore>) {
    let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::new());
    let client = ApiClient::new(
        &ApiConfig {
            base_url: base_url.to_string(),
            timeout_in_ms: 5_000,
        },
        store.clone(),
    )
    .expect("failed to build client");
    (Arc::new(client), store)
}

pub fn build_session(base_url: &str) -> (SessionManager, Arc<ApiClient>, Arc<dyn CredentialStore>) {
    let (client, store) = build_client(base_url);
    let session = SessionManager::new(client.clone(), store.clone());
    (session, client, store)
}

pub async fn seed_credentials(
    store: &Arc<dyn CredentialStore>,
    access_token: &str,
    refresh_token: Option<&str>,
) {
    store
        .save(&StoredCredentials {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.map(str::to_string),
        })
        .await
        .expect("failed to seed credentials");
}
