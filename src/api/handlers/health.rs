//! Health check endpoint handlers.

use axum::{Json, extract::State};
use jiff::Timestamp;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::HealthResponse;
use crate::state::AppState;

/// Creates health check routes.
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health_check))
}

/// Liveness check.
///
/// Does not touch the store; a slow database must not fail the liveness check.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::pkg_version().to_string(),
        storage: state.storage.to_string(),
        timestamp: Timestamp::now().to_string(),
    })
}
