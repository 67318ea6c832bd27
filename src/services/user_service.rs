//! User service: the four user operations with logging and timing.

use std::sync::Arc;

use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::User;
use crate::repositories::UserRepository;
use crate::services::instrumented::{OperationLog, run_logged};

/// User service wrapping the repository port.
///
/// Every call is logged before it starts and timed until the repository
/// returns. Results and faults come back exactly as the repository produced
/// them; absence is `None` and rejection is `false`, neither is an error.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new UserService with the given repository.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Lists all stored users.
    pub async fn get_all(&self) -> AppResult<Vec<User>> {
        let log = OperationLog::new(
            "Retrieving all users",
            "All users retrieved",
            "Something went wrong while retrieving all users",
        );

        run_logged(log, || self.repo.get_all())
            .instrument(info_span!("user_service.get_all"))
            .await
    }

    /// Fetches a user by id. `Ok(None)` when no such user exists.
    ///
    /// Unlike the other operations, a failed lookup still emits the timing
    /// log, right after the error log.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let log = OperationLog::new(
            format!("Retrieving user with id: {id}"),
            format!("User with id {id} retrieved"),
            format!("Something went wrong while retrieving user with id {id}"),
        )
        .timing_on_failure();

        run_logged(log, || self.repo.get_by_id(id))
            .instrument(info_span!("user_service.get_by_id", user_id = %id))
            .await
    }

    /// Stores `user` as given. The id must already be assigned.
    ///
    /// Returns the repository's verdict: `false` means the store refused it.
    pub async fn create(&self, user: &User) -> AppResult<bool> {
        let log = OperationLog::new(
            format!("Creating user with id {} and name: {}", user.id, user.full_name),
            format!("User with id {} created", user.id),
            "Something went wrong while creating a user",
        );

        run_logged(log, || self.repo.create(user))
            .instrument(info_span!(
                "user_service.create",
                user_id = %user.id,
                full_name = %user.full_name
            ))
            .await
    }

    /// Deletes a user by id. `Ok(false)` when nothing was removed.
    pub async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let log = OperationLog::new(
            format!("Deleting user with id: {id}"),
            format!("User with id {id} deleted"),
            format!("Something went wrong while deleting user with id {id}"),
        );

        run_logged(log, || self.repo.delete_by_id(id))
            .instrument(info_span!("user_service.delete_by_id", user_id = %id))
            .await
    }
}
