use crate::config::error::ConfigError;
use crate::error::DatabaseErrorConverter;
use axum::extract::rejection::{JsonRejection, PathRejection};
use diesel_async::pooled_connection::PoolError;
use serde::Serialize;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// Store-level faults (`Database`, `ConnectionPool`) are produced by the
/// repositories and travel through the service layer untouched; the HTTP
/// layer is the only place that turns them into status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error for a single field
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Validation error carrying every failing field of a request body
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error: {source}")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// A single failing field reported by request validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<PoolError> for AppError {
    fn from(error: PoolError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        match error {
            bb8::RunError::User(inner) => inner.into(),
            bb8::RunError::TimedOut => AppError::ConnectionPool {
                source: anyhow::anyhow!("timed out waiting for a database connection"),
            },
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "configuration".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut errors: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| ValidationFieldError {
                    field: field.to_string(),
                    message: failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string()),
                })
            })
            .collect();
        // field_errors() is backed by a HashMap
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_database_error_display_includes_source() {
        let error = AppError::Database {
            operation: "load users".to_string(),
            source: anyhow::anyhow!("Something went wrong"),
        };
        assert_eq!(
            error.to_string(),
            "Database operation failed: load users: Something went wrong"
        );
    }

    #[test]
    fn test_internal_error_display_hides_source() {
        let error = AppError::from(anyhow::anyhow!("secret detail"));
        assert_eq!(error.to_string(), "Internal error");
    }

    #[test]
    fn test_pool_timeout_maps_to_connection_pool() {
        let error = AppError::from(bb8::RunError::<PoolError>::TimedOut);
        assert!(matches!(error, AppError::ConnectionPool { .. }));
    }

    #[test]
    fn test_config_validation_error_keeps_field() {
        let error = AppError::from(ConfigError::validation("server.port", "bad port"));
        match error {
            AppError::Configuration { key, .. } => assert_eq!(key, "server.port"),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 1))]
        count: u32,
    }

    #[test]
    fn test_validation_errors_are_sorted_by_field() {
        let sample = Sample {
            name: String::new(),
            count: 0,
        };
        let error = AppError::from(sample.validate().unwrap_err());
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "count");
                assert_eq!(errors[0].message, "range");
                assert_eq!(errors[1].field, "name");
                assert_eq!(errors[1].message, "must not be empty");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }
}
