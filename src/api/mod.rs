//! Typed wrappers over the backend's business endpoints. From the client's
//! point of view these are opaque JSON/multipart resources; all auth concerns
//! live in [`crate::client`].

pub mod auth;
pub mod dashboard;
pub mod files;
pub mod schedules;
