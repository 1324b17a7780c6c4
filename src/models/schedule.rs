use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::RemittanceKind;

/// How often a recurring remittance job runs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleFrequency {
    Monthly,
    Quarterly,
}

impl fmt::Display for ScheduleFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleFrequency::Monthly => write!(f, "monthly"),
            ScheduleFrequency::Quarterly => write!(f, "quarterly"),
        }
    }
}

/// A recurring report-generation job persisted by the backend.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Schedule {
    pub id: String,
    pub name: String,
    pub kind: RemittanceKind,
    pub frequency: ScheduleFrequency,
    /// Day of the remittance month the job fires on (1-28).
    pub day_of_month: u8,
    pub active: bool,
    #[serde(default)]
    pub next_run: Option<DateTime<Utc>>,
}

/// Payload for creating a schedule. The backend assigns the id and next run.
#[derive(Serialize, Debug, Clone)]
pub struct NewSchedule {
    pub name: String,
    pub kind: RemittanceKind,
    pub frequency: ScheduleFrequency,
    pub day_of_month: u8,
}

/// Partial update for an existing schedule; absent fields are left untouched.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ScheduleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<ScheduleFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
