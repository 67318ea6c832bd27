//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::User;

/// Request body for creating a new user.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1 and 255 characters"
    ))]
    #[schema(min_length = 1, max_length = 255, example = "Nick Chapsas")]
    pub full_name: String,
}

impl CreateUserRequest {
    /// Builds the user to store, assigning a fresh random id.
    ///
    /// The name is kept verbatim.
    pub fn into_user(self) -> User {
        User::new(Uuid::new_v4(), self.full_name)
    }
}

/// Response body for user data.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_user_assigns_fresh_ids_and_keeps_name() {
        let first = CreateUserRequest {
            full_name: " Nick Chapsas ".to_string(),
        }
        .into_user();
        let second = CreateUserRequest {
            full_name: "Nick Chapsas".to_string(),
        }
        .into_user();

        assert_ne!(first.id, second.id);
        assert_eq!(first.id.get_version_num(), 4);
        assert_eq!(first.full_name, " Nick Chapsas ");
    }

    #[test]
    fn full_name_length_is_validated() {
        let ok = CreateUserRequest {
            full_name: "a".repeat(255),
        };
        assert!(ok.validate().is_ok());

        for full_name in [String::new(), "a".repeat(256)] {
            let request = CreateUserRequest { full_name };
            let errors = request.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("full_name"));
        }
    }
}
