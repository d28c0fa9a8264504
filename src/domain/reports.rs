//! Report-ready shapes produced by the aggregation engine. Each aggregate
//! result is an explicit record type so the wire format is visible here
//! rather than assembled ad hoc in handlers.

use serde::Serialize;
use uuid::Uuid;

use super::{Activity, Attendance, Contribution};

/// A contribution row decorated with the member's display name. The name is
/// absent when the referenced member no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct ContributionWithMember {
    #[serde(flatten)]
    pub contribution: Contribution,
    pub member_name: Option<String>,
}

/// An attendance row decorated with the member's display name.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceWithMember {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub member_name: Option<String>,
}

/// One participant of an activity, decorated with name and photo.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityParticipantWithName {
    pub id: Uuid,
    pub member_id: Uuid,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

/// An activity composed with its responsible member's name and its resolved
/// participant list. `participant_count` is always the length of
/// `participants`, never a stored counter.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityWithDetails {
    #[serde(flatten)]
    pub activity: Activity,
    pub responsible_name: Option<String>,
    pub participants: Vec<ActivityParticipantWithName>,
    pub participant_count: usize,
}

/// The four landing-view figures, computed from one captured instant.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_members: i64,
    pub monthly_contributions: i64,
    /// Integer percentage in [0, 100]; 0 when no attendance was recorded.
    pub attendance_rate: i64,
    pub upcoming_activities: i64,
}

/// Treasury summary figures.
#[derive(Debug, Clone, Serialize)]
pub struct ContributionStats {
    pub total: i64,
    pub this_month: i64,
    pub total_members: i64,
    /// Distinct members with a paid contribution for the current period.
    pub up_to_date: i64,
}

/// One bucket of the 12-month chart series.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyAmount {
    pub month: &'static str,
    pub amount: i64,
}
