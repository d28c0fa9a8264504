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
        Activity, ActivityParticipant, ActivityParticipantWithName, ActivityWithDetails,
        AddParticipantRequest, CreateActivityRequest, UpdateActivityRequest,
    },
    error::{AppError, Result},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ActivityWithDetails>>> {
    let activities = state
        .service_context
        .report_service
        .activities_with_details()
        .await?;

    Ok(Json(activities))
}

pub async fn upcoming(State(state): State<AppState>) -> Result<Json<Vec<ActivityWithDetails>>> {
    let activities = state
        .service_context
        .report_service
        .upcoming_activities()
        .await?;

    Ok(Json(activities))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActivityWithDetails>> {
    let activity = state
        .service_context
        .report_service
        .activity_with_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    Ok(Json(activity))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<Activity>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let activity = state.service_context.activity_repo.create(request).await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateActivityRequest>,
) -> Result<Json<Activity>> {
    update
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let activity = state
        .service_context
        .activity_repo
        .update(id, update)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    Ok(Json(activity))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.service_context.activity_repo.delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_participants(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ActivityParticipantWithName>>> {
    let participants = state
        .service_context
        .report_service
        .activity_participants(id)
        .await?;

    Ok(Json(participants))
}

pub async fn add_participant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddParticipantRequest>,
) -> Result<(StatusCode, Json<ActivityParticipant>)> {
    let participant = state
        .service_context
        .activity_repo
        .add_participant(id, request.member_id)
        .await?;

    Ok((StatusCode::CREATED, Json(participant)))
}

pub async fn remove_participant(
    State(state): State<AppState>,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    let removed = state
        .service_context
        .activity_repo
        .remove_participant(id, member_id)
        .await?;

    if !removed {
        return Err(AppError::NotFound("Participant not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
