use crate::client::{ApiClient, ApiRequest, Result};
use crate::models::{LoginRequest, TokenResponse, User};

/// Exchange username/password for a token pair.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<TokenResponse> {
    let request = ApiRequest::post("/login").with_json(&LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })?;
    client.send_json(&request).await
}

/// Fetch the profile of the user the current access token belongs to.
pub async fn fetch_profile(client: &ApiClient) -> Result<User> {
    client.send_json(&ApiRequest::get("/users/me")).await
}
