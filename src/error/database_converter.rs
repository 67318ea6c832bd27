use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting Diesel errors into `AppError` variants.
///
/// Everything the store reports becomes `AppError::Database` with the
/// failing operation attached, except `NotFound` which callers normally
/// avoid by using `.optional()`.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!(
                    "{}: {}",
                    Self::describe_kind(&kind),
                    info.message()
                )),
            },
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn describe_kind(kind: &DatabaseErrorKind) -> &'static str {
        match kind {
            DatabaseErrorKind::UniqueViolation => "Unique constraint violation",
            DatabaseErrorKind::ForeignKeyViolation => "Foreign key constraint violation",
            DatabaseErrorKind::NotNullViolation => "Not null constraint violation",
            DatabaseErrorKind::CheckViolation => "Check constraint violation",
            DatabaseErrorKind::SerializationFailure => "Serialization failure",
            DatabaseErrorKind::ReadOnlyTransaction => "Read-only transaction",
            DatabaseErrorKind::ClosedConnection => "Connection closed",
            _ => "Database error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            None
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_not_found_error() {
        let result =
            DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find user");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_convert_unique_violation_keeps_message() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint \"users_pkey\"".to_string(),
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::Database { operation, source } => {
                assert_eq!(operation, "insert user");
                assert!(source.to_string().starts_with("Unique constraint violation"));
                assert!(source.to_string().contains("users_pkey"));
            }
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_other_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(
            DieselError::RollbackTransaction,
            "delete user",
        );
        match result {
            AppError::Database { operation, .. } => assert_eq!(operation, "delete user"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }
}
