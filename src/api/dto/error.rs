//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::error::ValidationFieldError;

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "user with id '4b1c7c9e-8a43-4c1f-9a57-2f0b4d3e6a10' not found",
    "request_id": "2a9f5d0e-6c7b-4f0e-8f1e-5b7c3d2a1e90"
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    /// Adds structured details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{entity} with {field} '{value}' not found"),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value }))
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", &format!("Validation failed for {field}"))
            .with_details(json!({ "field": field, "reason": reason }))
    }

    pub fn validation_errors(errors: &[ValidationFieldError]) -> Self {
        Self::new("VALIDATION_ERROR", "Request validation failed")
            .with_details(json!({ "errors": errors }))
    }
}
