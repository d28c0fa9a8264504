use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Koinonia API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Membership, dues and activity tracking for a community organization",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "members": "/api/members",
            "contributions": "/api/contributions",
            "attendances": "/api/attendances",
            "activities": "/api/activities",
            "stats": "/api/stats"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
