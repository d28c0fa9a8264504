use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod activity_repository;
pub mod attendance_repository;
pub mod contribution_repository;
pub mod member_repository;

pub use activity_repository::SqliteActivityRepository;
pub use attendance_repository::SqliteAttendanceRepository;
pub use contribution_repository::SqliteContributionRepository;
pub use member_repository::SqliteMemberRepository;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create(&self, request: CreateMemberRequest) -> Result<Member>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>>;
    /// All members, newest first.
    async fn list(&self) -> Result<Vec<Member>>;
    async fn count_active(&self) -> Result<i64>;
    /// Id/name/photo projection of every member, for decorating report rows.
    async fn name_index(&self) -> Result<Vec<MemberRef>>;
    async fn update(&self, id: Uuid, update: UpdateMemberRequest) -> Result<Option<Member>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait ContributionRepository: Send + Sync {
    async fn create(&self, request: CreateContributionRequest) -> Result<Contribution>;
    /// All contributions, newest paid_date first.
    async fn list(&self) -> Result<Vec<Contribution>>;
    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Contribution>>;
    async fn sum_all(&self) -> Result<i64>;
    async fn sum_for_period(&self, month: i32, year: i32) -> Result<i64>;
    /// Distinct members with a paid contribution in the period.
    async fn count_paid_members(&self, month: i32, year: i32) -> Result<i64>;
    /// (month, total) pairs for the year; months without rows are absent.
    async fn monthly_totals(&self, year: i32) -> Result<Vec<(i64, i64)>>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, request: CreateAttendanceRequest) -> Result<Attendance>;
    /// Persists all rows in one transaction; an empty batch is rejected.
    async fn create_bulk(&self, requests: Vec<CreateAttendanceRequest>) -> Result<Vec<Attendance>>;
    /// All attendance rows, newest date first.
    async fn list(&self) -> Result<Vec<Attendance>>;
    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Attendance>>;
    async fn count_all(&self) -> Result<i64>;
    async fn count_present(&self) -> Result<i64>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn create(&self, request: CreateActivityRequest) -> Result<Activity>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Activity>>;
    /// All activities, newest date first.
    async fn list(&self) -> Result<Vec<Activity>>;
    /// Activities with date >= now, soonest first.
    async fn list_upcoming(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Activity>>;
    async fn count_upcoming(&self, now: DateTime<Utc>) -> Result<i64>;
    async fn update(&self, id: Uuid, update: UpdateActivityRequest) -> Result<Option<Activity>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
    async fn add_participant(&self, activity_id: Uuid, member_id: Uuid) -> Result<ActivityParticipant>;
    async fn remove_participant(&self, activity_id: Uuid, member_id: Uuid) -> Result<bool>;
    async fn list_participants(&self, activity_id: Uuid) -> Result<Vec<ActivityParticipant>>;
}
