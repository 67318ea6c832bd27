//! Embedded diesel migrations.
//!
//! Migrations run over a blocking `PgConnection` on the blocking thread pool;
//! diesel's migration harness is synchronous.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies all pending migrations and returns the names of the applied ones.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "run pending migrations", |conn| {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| applied.iter().map(|m| m.to_string()).collect())
    })
    .await
}

/// Lists the migrations that have not been applied yet.
pub async fn pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "check pending migrations", |conn| {
        conn.pending_migrations(MIGRATIONS)
            .map(|pending| pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
}

/// Reverts the last `steps` migrations and returns the reverted names.
///
/// Nothing is reverted when fewer than `steps` migrations are applied.
pub async fn revert_migrations(database_url: &str, steps: u32) -> AppResult<Vec<String>> {
    let database_url = database_url.to_string();
    blocking(move || {
        let mut conn = establish(&database_url, "revert migrations")?;

        let applied = conn
            .applied_migrations()
            .map_err(|e| harness_error("get applied migrations", e))?;
        check_rollback_steps(applied.len(), steps)?;

        let mut reverted = Vec::new();
        for _ in 0..steps {
            let version = conn
                .revert_last_migration(MIGRATIONS)
                .map_err(|e| harness_error("revert migrations", e))?;
            reverted.push(version.to_string());
        }
        Ok(reverted)
    })
    .await
}

fn check_rollback_steps(applied: usize, steps: u32) -> AppResult<()> {
    if applied < steps as usize {
        return Err(AppError::Validation {
            field: "rollback_steps".to_string(),
            reason: format!(
                "Cannot rollback {steps} migrations - only {applied} applied migrations available"
            ),
        });
    }
    Ok(())
}

type HarnessResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

async fn with_connection<T, F>(database_url: &str, operation: &'static str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> HarnessResult<T> + Send + 'static,
{
    let database_url = database_url.to_string();
    blocking(move || {
        let mut conn = establish(&database_url, operation)?;
        f(&mut conn).map_err(|e| harness_error(operation, e))
    })
    .await
}

async fn blocking<T, F>(f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
}

fn establish(database_url: &str, operation: &str) -> AppResult<PgConnection> {
    PgConnection::establish(database_url).map_err(|e| AppError::Database {
        operation: format!("establish connection to {operation}"),
        source: anyhow::anyhow!("Connection error: {}", e),
    })
}

fn harness_error(operation: &str, error: Box<dyn std::error::Error + Send + Sync>) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("Migration error: {}", error),
    }
}
