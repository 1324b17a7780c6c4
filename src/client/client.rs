use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{Error, Result};
use super::request::{ApiRequest, RequestBody};
use crate::config::ApiConfig;
use crate::models::{RefreshRequest, StoredCredentials, TokenResponse};
use crate::store::CredentialStore;

/// Session-level notifications emitted by the client. The original console
/// navigated the whole application to the login screen on refresh failure;
/// here the client only reports the fact and the consumer decides what
/// "go to login" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The refresh credential was rejected; stored credentials were purged.
    Invalidated,
}

/// Waiters parked while a refresh is in flight. Access tokens fan out as
/// owned strings and failures as messages, so the outcome clones cheaply.
///
/// The lock is a plain std mutex: it is never held across an await, only
/// around queue/flag manipulation.
#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<std::result::Result<String, String>>>,
}

/// Leadership over one refresh cycle.
///
/// Dropping the lead without settling it means the leader's future was
/// cancelled mid-refresh (a caller-side timeout or `select!`); the flag is
/// released and parked waiters are failed instead of being stranded on a
/// queue nobody will drain.
struct RefreshLead<'a> {
    state: &'a Mutex<RefreshState>,
    settled: bool,
}

impl RefreshLead<'_> {
    /// Drain the queue and release the flag in one critical section: the
    /// queue empties exactly once and is empty outside a refresh cycle.
    fn settle(mut self) -> Vec<oneshot::Sender<std::result::Result<String, String>>> {
        self.settled = true;
        let mut state = self.state.lock().expect("refresh state lock poisoned");
        state.in_flight = false;
        std::mem::take(&mut state.waiters)
    }
}

impl Drop for RefreshLead<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.state.lock().expect("refresh state lock poisoned");
        state.in_flight = false;
        for waiter in state.waiters.drain(..) {
            let _ = waiter.send(Err("refresh was abandoned".to_string()));
        }
    }
}

/// HTTP client for the remittance backend.
///
/// Every request carries the stored access token as a bearer credential.
/// A 401 response triggers one transparent refresh-and-replay; concurrent
/// 401s share a single refresh call (see [`ApiClient::fresh_access_token`]).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    refresh: Mutex<RefreshState>,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()?;
        let (events, _) = broadcast::channel(16);
        Ok(ApiClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            refresh: Mutex::new(RefreshState::default()),
            events,
        })
    }

    /// Subscribe to session-level events (currently only `Invalidated`).
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Send a request, recovering from an expired access token at most once.
    ///
    /// Non-401 responses (including other error statuses) are returned to the
    /// caller untouched. A 401 on the first attempt triggers a coordinated
    /// refresh; the request is then replayed exactly once with the new token.
    /// A 401 on the replay is surfaced as [`Error::Unauthorized`].
    pub async fn execute(&self, request: &ApiRequest) -> Result<reqwest::Response> {
        let token = self.stored_access_token().await?;
        let response = self.dispatch(request, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("Request to '{}' was unauthorized, refreshing token", request.path);
        let fresh = self.fresh_access_token().await?;
        let replayed = self.dispatch(request, Some(&fresh)).await?;
        if replayed.status() == StatusCode::UNAUTHORIZED {
            // Already retried once; do not loop.
            warn!("Replayed request to '{}' was rejected again", request.path);
            return Err(Error::Unauthorized);
        }
        Ok(replayed)
    }

    /// Execute a request and decode a JSON body, mapping non-2xx statuses to
    /// [`Error::Api`].
    pub async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let response = Self::error_for_status(self.execute(request).await?).await?;
        Ok(response.json().await?)
    }

    /// Execute a request and return the raw body bytes (file downloads).
    pub async fn send_bytes(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        let response = Self::error_for_status(self.execute(request).await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Execute a request where the caller only cares about success.
    pub async fn send_unit(&self, request: &ApiRequest) -> Result<()> {
        Self::error_for_status(self.execute(request).await?).await?;
        Ok(())
    }

    async fn stored_access_token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .load()
            .await
            .map_err(Error::Store)?
            .map(|c| c.access_token))
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header("x-request-id", Uuid::new_v4().to_string());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Upload(payload)) => builder.multipart(payload.to_form()),
            None => builder,
        };
        Ok(builder.send().await?)
    }

    /// Obtain a fresh access token, coordinating so that at most one refresh
    /// call is in flight process-wide. Callers that arrive while a refresh is
    /// running are parked on a oneshot channel and settle with the shared
    /// outcome; none settles before the refresh does.
    ///
    /// There is no refresh-specific timeout; the call is bounded by the
    /// client-wide request timeout like any other request. If the leading
    /// caller's future is dropped mid-refresh, [`RefreshLead`] releases the
    /// cycle and parked waiters fail with a refresh error.
    pub async fn fresh_access_token(&self) -> Result<String> {
        let waiter = {
            let mut state = self.refresh.lock().expect("refresh state lock poisoned");
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            return match rx.await {
                Ok(Ok(token)) => Ok(token),
                Ok(Err(message)) => Err(Error::RefreshFailed(message)),
                Err(_) => Err(Error::RefreshFailed("refresh was abandoned".to_string())),
            };
        }

        let lead = RefreshLead {
            state: &self.refresh,
            settled: false,
        };
        let outcome = self.run_refresh().await;

        let shared = match &outcome {
            Ok(token) => Ok(token.clone()),
            Err(e) => Err(e.to_string()),
        };
        for tx in lead.settle() {
            let _ = tx.send(shared.clone());
        }

        if outcome.is_err() {
            // Session is unrecoverable: purge credentials and notify.
            if let Err(e) = self.store.clear().await {
                warn!("Failed to clear credentials after refresh failure: {}", e);
            }
            let _ = self.events.send(SessionEvent::Invalidated);
        }
        outcome
    }

    async fn run_refresh(&self) -> Result<String> {
        let refresh_token = self
            .store
            .load()
            .await
            .map_err(Error::Store)?
            .and_then(|c| c.refresh_token)
            .ok_or_else(|| Error::RefreshFailed("no refresh token available".to_string()))?;

        debug!("Requesting a new access token");
        let response = self
            .http
            .post(format!("{}/refresh_token", self.base_url))
            .json(&RefreshRequest {
                refresh_token: refresh_token.clone(),
            })
            .send()
            .await
            .map_err(|e| Error::RefreshFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::RefreshFailed(format!(
                "refresh endpoint returned {}",
                response.status()
            )));
        }

        let payload: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::RefreshFailed(format!("malformed refresh response: {}", e)))?;

        // Keep the old refresh token when the backend does not rotate it.
        let rotated = StoredCredentials {
            access_token: payload.access_token.clone(),
            refresh_token: payload.refresh_token.or(Some(refresh_token)),
        };
        self.store.save(&rotated).await.map_err(Error::Store)?;
        info!("Access token refreshed");
        Ok(payload.access_token)
    }

    /// Map a non-success status to [`Error::Api`], extracting the backend's
    /// `{"error": ...}` message when present.
    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body);
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}
