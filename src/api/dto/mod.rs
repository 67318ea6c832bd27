//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User-related request/response DTOs
//! - `health` - Liveness response
//! - `error` - Common error response DTOs

mod error;
mod health;
mod user;

pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use user::{CreateUserRequest, UserResponse};
