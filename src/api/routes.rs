//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware, route_not_found};
use crate::state::AppState;

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers wrap everything added before them, so the last one runs first:
/// 1. CORS and compression
/// 2. Request ID - generates/propagates `x-request-id`
/// 3. Logging - logs requests with the request ID
/// 4. Timeout - answers 408 once `request_timeout` has elapsed
///
/// # Routes
/// - `/api/users` - User CRUD operations
/// - `/health` - Liveness check
/// - `/swagger-ui` - Swagger UI over [`OPENAPI_JSON_PATH`]
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/users", handlers::users::user_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    let router = router
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, api))
        .fallback(route_not_found);

    with_middleware(router, request_timeout).with_state(state)
}

fn with_middleware(router: Router<AppState>, request_timeout: Duration) -> Router<AppState> {
    router
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
