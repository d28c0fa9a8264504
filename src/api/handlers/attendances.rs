use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{Attendance, AttendanceWithMember, CreateAttendanceRequest},
    error::Result,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AttendanceWithMember>>> {
    let attendances = state
        .service_context
        .report_service
        .attendances_with_members()
        .await?;

    Ok(Json(attendances))
}

pub async fn list_by_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<Vec<Attendance>>> {
    let attendances = state
        .service_context
        .attendance_repo
        .list_by_member(member_id)
        .await?;

    Ok(Json(attendances))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateAttendanceRequest>,
) -> Result<(StatusCode, Json<Attendance>)> {
    let attendance = state.service_context.attendance_repo.create(request).await?;

    Ok((StatusCode::CREATED, Json(attendance)))
}

/// Records a whole service sheet at once. The batch is atomic; an empty
/// batch is rejected by the repository before any store access.
pub async fn create_bulk(
    State(state): State<AppState>,
    Json(requests): Json<Vec<CreateAttendanceRequest>>,
) -> Result<(StatusCode, Json<Vec<Attendance>>)> {
    let attendances = state
        .service_context
        .attendance_repo
        .create_bulk(requests)
        .await?;

    Ok((StatusCode::CREATED, Json(attendances)))
}
