use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    /// Survives deletion of the member (set to null by the store).
    pub responsible_id: Option<Uuid>,
    /// Advisory label set by callers. Read-side "upcoming" filters recompute
    /// from `date` and never consult this field.
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Upcoming,
    Past,
}

/// Registration of one member for one activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityParticipant {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub member_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub responsible_id: Option<Uuid>,
    #[serde(default = "default_activity_status")]
    pub status: ActivityStatus,
}

fn default_activity_status() -> ActivityStatus {
    ActivityStatus::Upcoming
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct UpdateActivityRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub responsible_id: Option<Uuid>,
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddParticipantRequest {
    pub member_id: Uuid,
}
