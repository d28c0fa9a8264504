use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{
        Contribution, ContributionStats, ContributionWithMember, CreateContributionRequest,
        MonthlyAmount,
    },
    error::{AppError, Result},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContributionWithMember>>> {
    let contributions = state
        .service_context
        .report_service
        .contributions_with_members()
        .await?;

    Ok(Json(contributions))
}

pub async fn list_by_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<Vec<Contribution>>> {
    let contributions = state
        .service_context
        .contribution_repo
        .list_by_member(member_id)
        .await?;

    Ok(Json(contributions))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<ContributionStats>> {
    let stats = state
        .service_context
        .report_service
        .contribution_stats()
        .await?;

    Ok(Json(stats))
}

/// The year arrives as a raw path segment; anything that does not parse as
/// an integer is rejected before the store is touched.
pub async fn monthly_chart(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<Vec<MonthlyAmount>>> {
    let year: i32 = year
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid year".to_string()))?;

    let chart = state
        .service_context
        .report_service
        .monthly_chart(year)
        .await?;

    Ok(Json(chart))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateContributionRequest>,
) -> Result<(StatusCode, Json<Contribution>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let contribution = state
        .service_context
        .contribution_repo
        .create(request)
        .await?;

    Ok((StatusCode::CREATED, Json(contribution)))
}
