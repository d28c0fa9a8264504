use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Standard monthly dues in whole currency units.
pub const STANDARD_DUES: i64 = 500;
/// Leaders contribute double the standard amount.
pub const LEADER_DUES: i64 = 1000;

/// A dues record against one (month, year) period. By convention a member
/// has one record per period, but this is not enforced by the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub id: Uuid,
    pub member_id: Uuid,
    pub amount: i64,
    pub month: i32,
    pub year: i32,
    pub status: ContributionStatus,
    pub paid_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    Paid,
    Unpaid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContributionRequest {
    pub member_id: Uuid,
    #[validate(range(min = 1))]
    pub amount: i64,
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[validate(range(min = 1000, max = 9999))]
    pub year: i32,
    #[serde(default = "default_contribution_status")]
    pub status: ContributionStatus,
    /// Defaults to the insertion instant when omitted.
    pub paid_date: Option<DateTime<Utc>>,
}

fn default_contribution_status() -> ContributionStatus {
    ContributionStatus::Paid
}
