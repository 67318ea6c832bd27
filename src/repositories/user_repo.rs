//! Persistence port for user records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::User;

/// Async CRUD access to stored users.
///
/// "Not found" and "rejected" are ordinary values (`None`, `false`); `Err`
/// is reserved for store malfunctions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns every stored user. An empty store yields an empty vector.
    async fn get_all(&self) -> AppResult<Vec<User>>;

    /// Returns the user with the given id, or `None` when it does not exist.
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Stores a new user.
    ///
    /// Returns `false` when the store refused the record (e.g. the id is
    /// already taken).
    async fn create(&self, user: &User) -> AppResult<bool>;

    /// Removes the user with the given id. Returns `false` if nothing was removed.
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
}
