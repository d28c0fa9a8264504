mod common;

use chrono::{Datelike, Duration, Utc};
use koinonia::{
    domain::{
        ActivityStatus, ContributionStatus, CreateActivityRequest, CreateAttendanceRequest,
        CreateContributionRequest, CreateMemberRequest, MemberStatus, ServiceType,
    },
    repository::{ActivityRepository, AttendanceRepository, ContributionRepository, MemberRepository},
    service::ServiceContext,
};
use uuid::Uuid;

fn contribution(
    member_id: Uuid,
    amount: i64,
    month: i32,
    year: i32,
    status: ContributionStatus,
) -> CreateContributionRequest {
    CreateContributionRequest {
        member_id,
        amount,
        month,
        year,
        status,
        paid_date: None,
    }
}

fn attendance(member_id: Uuid, present: bool) -> CreateAttendanceRequest {
    CreateAttendanceRequest {
        member_id,
        service_type: ServiceType::SundayWorship,
        date: Utc::now().date_naive(),
        present,
    }
}

fn activity(title: &str, days_from_now: i64, responsible_id: Option<Uuid>) -> CreateActivityRequest {
    CreateActivityRequest {
        title: title.to_string(),
        description: None,
        date: Utc::now() + Duration::days(days_from_now),
        responsible_id,
        status: ActivityStatus::Upcoming,
    }
}

async fn seed_member(ctx: &ServiceContext, first: &str, last: &str) -> anyhow::Result<Uuid> {
    Ok(common::create_member(ctx, first, last, MemberStatus::Active, false)
        .await?
        .id)
}

#[tokio::test]
async fn test_monthly_chart_is_dense_and_ordered() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let member = seed_member(&ctx, "Awa", "Ndiaye").await?;
    ctx.contribution_repo
        .create(contribution(member, 500, 3, 2024, ContributionStatus::Paid))
        .await?;
    ctx.contribution_repo
        .create(contribution(member, 1000, 3, 2024, ContributionStatus::Unpaid))
        .await?;
    ctx.contribution_repo
        .create(contribution(member, 750, 7, 2024, ContributionStatus::Paid))
        .await?;
    // Different year, must not leak into the 2024 chart
    ctx.contribution_repo
        .create(contribution(member, 9999, 3, 2023, ContributionStatus::Paid))
        .await?;

    let chart = ctx.report_service.monthly_chart(2024).await?;

    assert_eq!(chart.len(), 12);
    assert_eq!(chart[0].month, "Jan");
    assert_eq!(chart[11].month, "Déc");
    // March sums both rows regardless of paid/unpaid status
    assert_eq!(chart[2].amount, 1500);
    assert_eq!(chart[6].amount, 750);
    // Every other month is zero-filled, never omitted
    for (i, bucket) in chart.iter().enumerate() {
        if i != 2 && i != 6 {
            assert_eq!(bucket.amount, 0, "month {} should be empty", bucket.month);
        }
    }

    // A year with no data still yields the full axis
    let empty = ctx.report_service.monthly_chart(1999).await?;
    assert_eq!(empty.len(), 12);
    assert!(empty.iter().all(|b| b.amount == 0));

    Ok(())
}

#[tokio::test]
async fn test_dashboard_stats() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let now = Utc::now();
    let month = now.month() as i32;
    let year = now.year();

    let a = seed_member(&ctx, "Awa", "Ndiaye").await?;
    let b = seed_member(&ctx, "Moussa", "Diop").await?;
    common::create_member(&ctx, "Ibrahima", "Fall", MemberStatus::Inactive, false).await?;

    // Current period: 500 paid + 1000 unpaid both count toward the sum
    ctx.contribution_repo
        .create(contribution(a, 500, month, year, ContributionStatus::Paid))
        .await?;
    ctx.contribution_repo
        .create(contribution(b, 1000, month, year, ContributionStatus::Unpaid))
        .await?;
    // Same month a year earlier is a different period
    ctx.contribution_repo
        .create(contribution(a, 400, month, year - 1, ContributionStatus::Paid))
        .await?;

    // 3 present out of 4 rows -> round(75)
    for present in [true, true, true, false] {
        ctx.attendance_repo.create(attendance(a, present)).await?;
    }

    ctx.activity_repo.create(activity("Sortie plage", 3, None)).await?;
    ctx.activity_repo.create(activity("Concert", 10, None)).await?;
    ctx.activity_repo.create(activity("Retraite passée", -5, None)).await?;

    let stats = ctx.report_service.dashboard_stats().await?;

    assert_eq!(stats.total_members, 2);
    assert_eq!(stats.monthly_contributions, 1500);
    assert_eq!(stats.attendance_rate, 75);
    assert_eq!(stats.upcoming_activities, 2);

    Ok(())
}

#[tokio::test]
async fn test_attendance_rate_with_no_rows_is_zero() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let stats = ctx.report_service.dashboard_stats().await?;
    assert_eq!(stats.attendance_rate, 0);

    Ok(())
}

#[tokio::test]
async fn test_attendance_rate_is_bounded() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let a = seed_member(&ctx, "Awa", "Ndiaye").await?;
    for present in [true, true, false] {
        ctx.attendance_repo.create(attendance(a, present)).await?;
    }

    let stats = ctx.report_service.dashboard_stats().await?;
    // round(100 * 2/3) = 67
    assert_eq!(stats.attendance_rate, 67);
    assert!((0..=100).contains(&stats.attendance_rate));

    Ok(())
}

#[tokio::test]
async fn test_contribution_stats() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let now = Utc::now();
    let month = now.month() as i32;
    let year = now.year();

    let a = seed_member(&ctx, "Awa", "Ndiaye").await?;
    let b = seed_member(&ctx, "Moussa", "Diop").await?;
    common::create_member(&ctx, "Ibrahima", "Fall", MemberStatus::Inactive, false).await?;

    // A pays twice for the current period; DISTINCT keeps the count at one
    ctx.contribution_repo
        .create(contribution(a, 500, month, year, ContributionStatus::Paid))
        .await?;
    ctx.contribution_repo
        .create(contribution(a, 500, month, year, ContributionStatus::Paid))
        .await?;
    // B has only an unpaid record for the current period
    ctx.contribution_repo
        .create(contribution(b, 500, month, year, ContributionStatus::Unpaid))
        .await?;
    // Old period contributes to the all-time total only
    ctx.contribution_repo
        .create(contribution(b, 1000, month, year - 1, ContributionStatus::Paid))
        .await?;

    let stats = ctx.report_service.contribution_stats().await?;

    assert_eq!(stats.total, 2500);
    assert_eq!(stats.this_month, 1500);
    assert_eq!(stats.total_members, 2);
    assert_eq!(stats.up_to_date, 1);
    assert!(stats.up_to_date <= stats.total_members);

    Ok(())
}

#[tokio::test]
async fn test_listings_are_decorated_with_member_names() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let a = seed_member(&ctx, "Awa", "Ndiaye").await?;
    ctx.contribution_repo
        .create(contribution(a, 500, 1, 2024, ContributionStatus::Paid))
        .await?;
    ctx.attendance_repo.create(attendance(a, true)).await?;

    let contributions = ctx.report_service.contributions_with_members().await?;
    assert_eq!(contributions.len(), 1);
    assert_eq!(contributions[0].member_name.as_deref(), Some("Awa Ndiaye"));

    let attendances = ctx.report_service.attendances_with_members().await?;
    assert_eq!(attendances.len(), 1);
    assert_eq!(attendances[0].member_name.as_deref(), Some("Awa Ndiaye"));

    Ok(())
}

#[tokio::test]
async fn test_member_deletion_cascades_and_degrades_names() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let responsible = seed_member(&ctx, "Moussa", "Diop").await?;
    let participant = seed_member(&ctx, "Awa", "Ndiaye").await?;

    ctx.contribution_repo
        .create(contribution(participant, 500, 1, 2024, ContributionStatus::Paid))
        .await?;
    ctx.attendance_repo.create(attendance(participant, true)).await?;

    let act = ctx
        .activity_repo
        .create(activity("Sortie plage", 5, Some(responsible)))
        .await?;
    ctx.activity_repo.add_participant(act.id, participant).await?;

    // Owned rows disappear with the member
    ctx.member_repo.delete(participant).await?;
    assert!(ctx.contribution_repo.list_by_member(participant).await?.is_empty());
    assert!(ctx.attendance_repo.list_by_member(participant).await?.is_empty());
    let details = ctx
        .report_service
        .activity_with_details(act.id)
        .await?
        .expect("activity should survive");
    assert_eq!(details.participant_count, 0);
    assert!(details.participants.is_empty());

    // The responsible link degrades to an absent name, the row still renders
    ctx.member_repo.delete(responsible).await?;
    let details = ctx
        .report_service
        .activity_with_details(act.id)
        .await?
        .expect("activity should survive");
    assert_eq!(details.responsible_name, None);
    assert_eq!(details.activity.title, "Sortie plage");

    Ok(())
}

#[tokio::test]
async fn test_activity_composition() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let responsible = common::create_member(&ctx, "Moussa", "Diop", MemberStatus::Active, true)
        .await?
        .id;
    let with_photo = ctx
        .member_repo
        .create(CreateMemberRequest {
            first_name: "Awa".to_string(),
            last_name: "Ndiaye".to_string(),
            date_of_birth: None,
            photo_url: Some("https://example.org/awa.jpg".to_string()),
            church_role: None,
            external_role: None,
            neighborhood: None,
            phone: None,
            is_leader: false,
            status: MemberStatus::Active,
        })
        .await?;

    let act = ctx
        .activity_repo
        .create(activity("Concert", 7, Some(responsible)))
        .await?;

    // No participants yet: empty list, zero count, no error
    let details = ctx
        .report_service
        .activity_with_details(act.id)
        .await?
        .expect("activity exists");
    assert_eq!(details.participant_count, 0);
    assert!(details.participants.is_empty());
    assert_eq!(details.responsible_name.as_deref(), Some("Moussa Diop"));

    ctx.activity_repo.add_participant(act.id, with_photo.id).await?;
    ctx.activity_repo.add_participant(act.id, responsible).await?;

    let details = ctx
        .report_service
        .activity_with_details(act.id)
        .await?
        .expect("activity exists");
    assert_eq!(details.participant_count, 2);
    assert_eq!(details.participants.len(), 2);

    let awa = details
        .participants
        .iter()
        .find(|p| p.member_id == with_photo.id)
        .expect("participant should be listed");
    assert_eq!(awa.name.as_deref(), Some("Awa Ndiaye"));
    assert_eq!(awa.photo_url.as_deref(), Some("https://example.org/awa.jpg"));

    // Removing one participant shrinks the resolved count
    let removed = ctx
        .activity_repo
        .remove_participant(act.id, responsible)
        .await?;
    assert!(removed);
    let details = ctx
        .report_service
        .activity_with_details(act.id)
        .await?
        .expect("activity exists");
    assert_eq!(details.participant_count, 1);

    Ok(())
}

#[tokio::test]
async fn test_unknown_activity_is_absent_not_an_error() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let details = ctx.report_service.activity_with_details(Uuid::new_v4()).await?;
    assert!(details.is_none());

    Ok(())
}

#[tokio::test]
async fn test_upcoming_activities_are_capped_and_sorted() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    for days in [7, 3, 1, 5, 6, 4, 2] {
        ctx.activity_repo
            .create(activity(&format!("Dans {} jours", days), days, None))
            .await?;
    }
    // Stored status says upcoming, but the date rules it out
    ctx.activity_repo
        .create(activity("Déjà passée", -2, None))
        .await?;

    let now = Utc::now();
    let upcoming = ctx.report_service.upcoming_activities().await?;

    // Never more than 5, soonest first, nothing in the past
    assert_eq!(upcoming.len(), 5);
    for pair in upcoming.windows(2) {
        assert!(pair[0].activity.date <= pair[1].activity.date);
    }
    assert!(upcoming.iter().all(|a| a.activity.date >= now));
    assert_eq!(upcoming[0].activity.title, "Dans 1 jours");
    assert!(upcoming.iter().all(|a| a.activity.title != "Déjà passée"));

    Ok(())
}

#[tokio::test]
async fn test_all_activities_listing_is_newest_first() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    ctx.activity_repo.create(activity("Ancienne", -10, None)).await?;
    ctx.activity_repo.create(activity("Prochaine", 10, None)).await?;
    ctx.activity_repo.create(activity("Demain", 1, None)).await?;

    let all = ctx.report_service.activities_with_details().await?;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].activity.title, "Prochaine");
    assert_eq!(all[1].activity.title, "Demain");
    assert_eq!(all[2].activity.title, "Ancienne");

    Ok(())
}
