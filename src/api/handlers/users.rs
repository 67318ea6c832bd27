//! User CRUD request handlers.
//!
//! Handlers translate HTTP to `UserService` calls. Ids for new users are
//! assigned here, before the service sees them.

use axum::{
    Json,
    extract::State,
    http::{HeaderName, StatusCode, header},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, ErrorResponse, UserResponse};
use crate::api::extract::{ApiPath, ValidatedJson};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Creates user-related routes.
///
/// Routes:
/// - GET /        - List all users
/// - POST /       - Create a new user
/// - GET /{id}    - Get user by ID
/// - DELETE /{id} - Delete user by ID
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(create_user))
        .routes(routes!(get_user))
        .routes(routes!(delete_user))
}

fn user_not_found(id: Uuid) -> AppError {
    AppError::NotFound {
        entity: "user".to_string(),
        field: "id".to_string(),
        value: id.to_string(),
    }
}

/// GET /api/users - List all users
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Every stored user", body = Vec<UserResponse>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.services.users.get_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id} - Get user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No user with this id", body = ErrorResponse)
    )
)]
async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<UserResponse>> {
    state
        .services
        .users
        .get_by_id(id)
        .await?
        .map(|user| Json(UserResponse::from(user)))
        .ok_or_else(|| user_not_found(id))
}

/// POST /api/users - Create new user
///
/// Returns 201 with a `Location` header pointing at the new user.
#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Invalid body or user rejected", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<UserResponse>)> {
    let user = payload.into_user();

    if !state.services.users.create(&user).await? {
        return Err(AppError::BadRequest {
            message: format!("User with id {} could not be created", user.id),
        });
    }

    let location = format!("/api/users/{}", user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserResponse::from(user)),
    ))
}

/// DELETE /api/users/{id} - Delete user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "No user with this id", body = ErrorResponse)
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    if state.services.users.delete_by_id(id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(user_not_found(id))
    }
}
