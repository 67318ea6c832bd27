//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "storage": "postgres",
    "timestamp": "2024-01-01T12:00:00Z"
}))]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: String,
    /// Application version
    pub version: String,
    /// Configured storage backend
    pub storage: String,
    /// Time of the check (RFC 3339)
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
}
