mod common;

use koinonia::{
    domain::{MemberStatus, UpdateMemberRequest},
    repository::MemberRepository,
};

#[tokio::test]
async fn test_member_crud() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    // Test Create
    let member =
        common::create_member(&ctx, "Awa", "Ndiaye", MemberStatus::Active, false).await?;
    assert_eq!(member.first_name, "Awa");
    assert_eq!(member.last_name, "Ndiaye");
    assert_eq!(member.status, MemberStatus::Active);
    assert!(!member.is_leader);
    assert_eq!(member.display_name(), "Awa Ndiaye");

    // Test Find by ID
    let found = ctx.member_repo.find_by_id(member.id).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, member.id);

    // Test List
    let members = ctx.member_repo.list().await?;
    assert_eq!(members.len(), 1);

    // Test Update
    let update = UpdateMemberRequest {
        status: Some(MemberStatus::Inactive),
        neighborhood: Some("Médina".to_string()),
        ..Default::default()
    };

    let updated = ctx
        .member_repo
        .update(member.id, update)
        .await?
        .expect("member should exist");
    assert_eq!(updated.status, MemberStatus::Inactive);
    assert_eq!(updated.neighborhood.as_deref(), Some("Médina"));
    // Untouched fields survive a partial update
    assert_eq!(updated.first_name, "Awa");

    // Test Delete
    let deleted = ctx.member_repo.delete(member.id).await?;
    assert!(deleted);
    let gone = ctx.member_repo.find_by_id(member.id).await?;
    assert!(gone.is_none());

    // Deleting again reports nothing was removed
    let deleted_again = ctx.member_repo.delete(member.id).await?;
    assert!(!deleted_again);

    Ok(())
}

#[tokio::test]
async fn test_count_active_ignores_inactive_members() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    common::create_member(&ctx, "Moussa", "Diop", MemberStatus::Active, true).await?;
    common::create_member(&ctx, "Fatou", "Sall", MemberStatus::Active, false).await?;
    common::create_member(&ctx, "Ibrahima", "Fall", MemberStatus::Inactive, false).await?;

    assert_eq!(ctx.member_repo.count_active().await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_name_index_covers_all_members() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let ctx = common::service_context(pool);

    let a = common::create_member(&ctx, "Moussa", "Diop", MemberStatus::Active, false).await?;
    common::create_member(&ctx, "Fatou", "Sall", MemberStatus::Inactive, false).await?;

    let index = ctx.member_repo.name_index().await?;
    assert_eq!(index.len(), 2);

    let entry = index
        .iter()
        .find(|m| m.id == a.id)
        .expect("member should be indexed");
    assert_eq!(entry.first_name, "Moussa");
    assert_eq!(entry.last_name, "Diop");

    Ok(())
}
