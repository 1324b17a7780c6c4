use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the API client and the layers built on it.
#[derive(Debug, Error)]
pub enum Error {
    /// Network/transport failure; never recovered automatically.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected the credentials and a refresh was not possible
    /// or already consumed for this request.
    #[error("unauthorized")]
    Unauthorized,

    /// The refresh call itself failed. Fatal for the session: credentials
    /// are purged and a `SessionEvent::Invalidated` is broadcast.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    /// Any non-401 error status, passed through unmodified.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("credential store error: {0}")]
    Store(String),
}
