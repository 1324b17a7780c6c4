pub mod guard;
pub mod session;

// Re-export the session items so code outside can do
// "use crate::session::{SessionManager, SessionState};"
pub use guard::{evaluate, Access, Redirect};
pub use session::{SessionManager, SessionState};
