use serde::{Deserialize, Serialize};

/// Upload/processing volume for one wage month, used by the dashboard chart.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MonthlyVolume {
    /// Wage period, `YYYY-MM`.
    pub month: String,
    pub uploads: u32,
    pub processed: u32,
}

/// Aggregate counts backing the dashboard screen.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DashboardSummary {
    pub total_files: u64,
    pub processed: u64,
    pub failed: u64,
    pub pending: u64,
    #[serde(default)]
    pub monthly: Vec<MonthlyVolume>,
}
