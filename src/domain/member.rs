use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub church_role: Option<String>,
    pub external_role: Option<String>,
    pub neighborhood: Option<String>,
    pub phone: Option<String>,
    pub is_leader: bool,
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// "First Last" with a single space, as shown everywhere in the app.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
}

/// Lightweight projection of a member used to decorate report rows with a
/// display name and photo without loading full records.
#[derive(Debug, Clone)]
pub struct MemberRef {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub church_role: Option<String>,
    pub external_role: Option<String>,
    pub neighborhood: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub is_leader: bool,
    #[serde(default = "default_member_status")]
    pub status: MemberStatus,
}

fn default_member_status() -> MemberStatus {
    MemberStatus::Active
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub church_role: Option<String>,
    pub external_role: Option<String>,
    pub neighborhood: Option<String>,
    pub phone: Option<String>,
    pub is_leader: Option<bool>,
    pub status: Option<MemberStatus>,
}
