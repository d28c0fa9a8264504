use axum::{extract::State, Json};

use crate::{api::state::AppState, domain::DashboardStats, error::Result};

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let stats = state.service_context.report_service.dashboard_stats().await?;
    Ok(Json(stats))
}
