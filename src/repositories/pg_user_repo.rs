//! User repository for async database operations.
//!
//! Provides CRUD operations for the users table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::User;
use crate::repositories::UserRepository;

/// PostgreSQL-backed user repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: AsyncDbPool,
}

impl PgUserRepository {
    /// Creates a new PgUserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_all(&self) -> AppResult<Vec<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list users"))
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user by id"))
    }

    async fn create(&self, user: &User) -> AppResult<bool> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        // A taken id is a rejected insert, not a fault.
        let inserted = diesel::insert_into(users)
            .values(user)
            .on_conflict(id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))?;

        Ok(inserted > 0)
    }

    async fn delete_by_id(&self, user_id: Uuid) -> AppResult<bool> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(users.filter(id.eq(user_id)))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete user"))?;

        Ok(deleted > 0)
    }
}
