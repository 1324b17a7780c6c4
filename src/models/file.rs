use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which statutory remittance stream a file belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RemittanceKind {
    /// Provident Fund (ECR upload).
    Pf,
    /// Employee State Insurance contribution file.
    Esi,
}

impl fmt::Display for RemittanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemittanceKind::Pf => write!(f, "pf"),
            RemittanceKind::Esi => write!(f, "esi"),
        }
    }
}

/// Processing state of an uploaded remittance file, as reported by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Processing,
    Processed,
    Failed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Pending => write!(f, "pending"),
            FileStatus::Processing => write!(f, "processing"),
            FileStatus::Processed => write!(f, "processed"),
            FileStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A remittance file known to the backend, either freshly uploaded or already
/// processed into a challan/report.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RemittanceFile {
    pub id: String,
    pub name: String,
    pub kind: RemittanceKind,
    /// Wage period the file covers, `YYYY-MM`.
    pub period: String,
    pub status: FileStatus,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    /// Populated when `status` is `Failed`.
    #[serde(default)]
    pub error: Option<String>,
}
