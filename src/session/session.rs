use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api;
use crate::client::{ApiClient, Error, Result};
use crate::models::{StoredCredentials, User};
use crate::store::CredentialStore;

/// A snapshot of the session, published to readers through a watch channel.
///
/// `loading` is true from construction until the first session resolution
/// settles — a `load`, a direct `login`, or a `logout` — so consumers can
/// tell "unauthenticated" apart from "not yet determined".
#[derive(Debug, Clone)]
pub struct SessionState {
    pub loading: bool,
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            loading: true,
            token: None,
            user: None,
        }
    }
}

/// Single source of truth for "is there a logged-in user, and who".
///
/// The manager is the only writer of [`SessionState`]; everything else holds
/// a watch receiver. Setting a token (login, or a persisted one found at
/// startup) triggers a profile fetch; a failed fetch degrades to logout.
pub struct SessionManager {
    client: Arc<ApiClient>,
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    pub fn new(client: Arc<ApiClient>, store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        SessionManager {
            client,
            store,
            state,
        }
    }

    /// Subscribe to session state changes.
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Resolve the persisted session at startup. If a token is stored, the
    /// profile is fetched through the client, which may transparently refresh
    /// an expired access token along the way. Always ends with
    /// `loading = false`.
    pub async fn load(&self) {
        match self.store.load().await {
            Ok(Some(credentials)) => {
                debug!("Found persisted credentials, resolving profile");
                self.state
                    .send_modify(|s| s.token = Some(credentials.access_token));
                if let Err(e) = self.resolve_profile().await {
                    info!("Persisted session is no longer valid: {}", e);
                    self.logout().await;
                }
            }
            Ok(None) => debug!("No persisted credentials, starting logged out"),
            Err(e) => warn!("Could not read credential store: {}", e),
        }
        self.state.send_modify(|s| s.loading = false);
    }

    /// Authenticate with the backend and populate the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let tokens = api::auth::login(&self.client, username, password).await?;
        self.store
            .save(&StoredCredentials {
                access_token: tokens.access_token.clone(),
                refresh_token: tokens.refresh_token.clone(),
            })
            .await
            .map_err(Error::Store)?;
        self.state
            .send_modify(|s| s.token = Some(tokens.access_token));

        // Profile follows the token, as in the original console.
        match self.resolve_profile().await {
            Ok(user) => Ok(user),
            Err(e) => {
                warn!("Login succeeded but profile fetch failed: {}", e);
                self.logout().await;
                Err(e)
            }
        }
    }

    /// Clear the persisted credentials and the in-memory session. Idempotent:
    /// logging out while logged out leaves the state unchanged.
    pub async fn logout(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear credential store on logout: {}", e);
        }
        self.state.send_modify(|s| {
            s.token = None;
            s.user = None;
            s.loading = false;
        });
    }

    async fn resolve_profile(&self) -> Result<User> {
        let user = api::auth::fetch_profile(&self.client).await?;
        info!("Session resolved for '{}'", user.username);
        // The client may have rotated the token while fetching; publish
        // whatever is now persisted.
        let token = self
            .store
            .load()
            .await
            .map_err(Error::Store)?
            .map(|c| c.access_token);
        // A settled profile attempt resolves the loading flag even when the
        // caller skipped `load()` and went straight to `login()`.
        self.state.send_modify(|s| {
            s.token = token;
            s.user = Some(user.clone());
            s.loading = false;
        });
        Ok(user)
    }
}
