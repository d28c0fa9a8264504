pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // API routes
        .nest("/api", api_routes())
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::stats::dashboard))
        .nest("/members", member_routes())
        .nest("/contributions", contribution_routes())
        .nest("/attendances", attendance_routes())
        .nest("/activities", activity_routes())
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::members::list))
        .route("/", post(handlers::members::create))
        .route("/:id", get(handlers::members::get))
        .route("/:id", put(handlers::members::update))
        .route("/:id", delete(handlers::members::delete))
}

fn contribution_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::contributions::list))
        .route("/", post(handlers::contributions::create))
        .route("/stats", get(handlers::contributions::stats))
        .route("/monthly-chart/:year", get(handlers::contributions::monthly_chart))
        .route("/member/:member_id", get(handlers::contributions::list_by_member))
}

fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::attendances::list))
        .route("/", post(handlers::attendances::create))
        .route("/bulk", post(handlers::attendances::create_bulk))
        .route("/member/:member_id", get(handlers::attendances::list_by_member))
}

fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::activities::list))
        .route("/", post(handlers::activities::create))
        .route("/upcoming", get(handlers::activities::upcoming))
        .route("/:id", get(handlers::activities::get))
        .route("/:id", put(handlers::activities::update))
        .route("/:id", delete(handlers::activities::delete))
        .route("/:id/participants", get(handlers::activities::list_participants))
        .route("/:id/participants", post(handlers::activities::add_participant))
        .route(
            "/:id/participants/:member_id",
            delete(handlers::activities::remove_participant),
        )
}
