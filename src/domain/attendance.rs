use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Presence of one member at one recurring service, on a calendar date.
/// Distinct from activity participation, which is registration-intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub member_id: Uuid,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    pub present: bool,
    pub created_at: DateTime<Utc>,
}

/// The fixed set of service slots attendance is recorded against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceType {
    #[serde(rename = "Mardi - Méditation")]
    TuesdayMeditation,
    #[serde(rename = "Jeudi - Exhortation")]
    ThursdayExhortation,
    #[serde(rename = "Dimanche - Louange et Adoration")]
    SundayWorship,
    #[serde(rename = "Activités")]
    Activities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAttendanceRequest {
    pub member_id: Uuid,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    #[serde(default = "default_present")]
    pub present: bool,
}

fn default_present() -> bool {
    true
}
