use serde::{Deserialize, Serialize};

/// Credentials submitted to the login endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /refresh_token`.
#[derive(Serialize, Debug, Clone)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token payload returned by the login and refresh endpoints.
///
/// The refresh endpoint may omit `refresh_token` when it does not rotate
/// the refresh credential; callers keep the previous one in that case.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub token_type: String,
}

/// The two credential strings held in durable storage between runs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}
