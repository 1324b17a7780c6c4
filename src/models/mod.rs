pub mod dashboard;
pub mod file;
pub mod schedule;
pub mod token;
pub mod user;

// Re-export the model types so code outside can do
// "use crate::models::{User, Role};"
pub use dashboard::{DashboardSummary, MonthlyVolume};
pub use file::{FileStatus, RemittanceFile, RemittanceKind};
pub use schedule::{NewSchedule, Schedule, ScheduleFrequency, ScheduleUpdate};
pub use token::{LoginRequest, RefreshRequest, StoredCredentials, TokenResponse};
pub use user::{Role, User};
