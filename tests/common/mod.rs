use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use koinonia::{
    domain::{CreateMemberRequest, Member, MemberStatus},
    repository::{
        MemberRepository, SqliteActivityRepository, SqliteAttendanceRepository,
        SqliteContributionRepository, SqliteMemberRepository,
    },
    service::ServiceContext,
};

/// In-memory SQLite with the real migrations applied. A single connection
/// keeps every query of a test on the same database.
pub async fn setup_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub fn service_context(pool: SqlitePool) -> Arc<ServiceContext> {
    let member_repo = Arc::new(SqliteMemberRepository::new(pool.clone()));
    let contribution_repo = Arc::new(SqliteContributionRepository::new(pool.clone()));
    let attendance_repo = Arc::new(SqliteAttendanceRepository::new(pool.clone()));
    let activity_repo = Arc::new(SqliteActivityRepository::new(pool.clone()));

    Arc::new(ServiceContext::new(
        member_repo,
        contribution_repo,
        attendance_repo,
        activity_repo,
    ))
}

#[allow(dead_code)]
pub async fn create_member(
    ctx: &ServiceContext,
    first_name: &str,
    last_name: &str,
    status: MemberStatus,
    is_leader: bool,
) -> anyhow::Result<Member> {
    let member = ctx
        .member_repo
        .create(CreateMemberRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: None,
            photo_url: None,
            church_role: None,
            external_role: None,
            neighborhood: None,
            phone: None,
            is_leader,
            status,
        })
        .await?;

    Ok(member)
}
