//! Error handler for converting AppError to HTTP responses.
//!
//! Status codes and error codes are decided here and nowhere else. Store
//! faults are sanitized: the response names the failed operation but never
//! the underlying driver message.

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::api::middleware::current_request_id;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response, attaching the current
    /// request id when one is set.
    fn into_response(self) -> Response {
        error_to_response(self, current_request_id())
    }
}

/// Builds the JSON error response for `error`.
pub fn error_to_response(error: AppError, request_id: Option<String>) -> Response {
    let status = error_to_status_code(&error);
    let code = error_to_code(&error);

    let mut body = match &error {
        AppError::NotFound {
            entity,
            field,
            value,
        } => ErrorResponse::not_found_error(entity, field, value),
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => ErrorResponse::validation_errors(errors),
        AppError::BadRequest { message } => ErrorResponse::new(code, message),
        AppError::Database { operation, .. } => ErrorResponse::new(
            code,
            &format!("Database operation failed: {operation}"),
        )
        .with_details(json!({ "operation": operation })),
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, &format!("Configuration error: {key}"))
                .with_details(json!({ "key": key }))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(code, "Database connection unavailable")
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    };

    if let Some(request_id) = request_id {
        body = body.with_request_id(&request_id);
    }

    (status, Json(body)).into_response()
}

/// Maps an AppError variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Maps an AppError variant to the `code` field of the error body.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Fallback for unknown routes, in the common error format.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        entity: "route".to_string(),
        field: "path".to_string(),
        value: uri.path().to_string(),
    }
}
