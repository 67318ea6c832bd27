//! Repository layer for data access operations.
//!
//! `UserRepository` is the persistence port the service layer depends on;
//! `PgUserRepository` and `InMemoryUserRepository` are its adapters.

mod memory_user_repo;
mod pg_user_repo;
mod user_repo;

pub use memory_user_repo::InMemoryUserRepository;
pub use pg_user_repo::PgUserRepository;
pub use user_repo::UserRepository;
#[cfg(test)]
pub use user_repo::MockUserRepository;

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Repositories are held behind `Arc<dyn ...>` so the services do not care
/// which backend was configured. Cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// Creates repositories backed by PostgreSQL.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }

    /// Creates repositories backed by process memory.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }
}
