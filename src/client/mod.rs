pub mod client;
pub mod error;
pub mod request;

// Re-export from client.rs so we can do "use crate::client::*;"
pub use client::{ApiClient, SessionEvent};
pub use error::{Error, Result};
pub use request::ApiRequest;
