//! Library exports for remitdesk, shared between the binary and tests.

pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;
