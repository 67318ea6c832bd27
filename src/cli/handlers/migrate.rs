//! Migrate command handler
//!
//! Applies, previews or reverts the embedded schema migrations. Only the
//! postgres backend has a schema; asking the memory backend to migrate is an
//! error rather than a silent no-op.

use tracing::info;

use crate::config::{Settings, StorageBackend};
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    /// Create a new migrate command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command
    ///
    /// `dry_run` lists pending migrations, `rollback` reverts that many of the
    /// most recent ones, and with neither every pending migration is applied.
    ///
    /// # Errors
    /// - `Validation` for the memory backend, zero rollback steps or more
    ///   steps than there are applied migrations
    /// - `Database` when connecting or migrating fails
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.ensure_postgres()?;
        self.config.database.validate()?;

        match (dry_run, rollback) {
            (true, _) => self.show_pending_migrations().await,
            (false, Some(steps)) => self.rollback_migrations(steps).await,
            (false, None) => self.run_migrations().await,
        }
    }

    fn ensure_postgres(&self) -> AppResult<()> {
        match self.config.database.backend {
            StorageBackend::Postgres => Ok(()),
            StorageBackend::Memory => Err(AppError::Validation {
                field: "database.backend".to_string(),
                reason: "Migrations require the postgres backend; the memory backend has no schema"
                    .to_string(),
            }),
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let pending = pending_migrations(&self.config.database.url).await?;

        if pending.is_empty() {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for migration in &pending {
                println!("  - {migration}");
            }
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = run_pending_migrations(&self.config.database.url).await?;
        info!(count = applied.len(), "Applied database migrations");

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for migration in &applied {
                println!("  - {migration}");
            }
        }

        Ok(())
    }

    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        println!("Rolling back {steps} migration(s)...");

        let reverted = revert_migrations(&self.config.database.url, steps).await?;
        info!(count = reverted.len(), "Reverted database migrations");

        println!("✓ Rolled back {} migration(s):", reverted.len());
        for migration in &reverted {
            println!("  - {migration}");
        }

        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/users".to_string();
        config
    }

    fn assert_validation_field(result: AppResult<()>, expected: &str) {
        match result {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected validation error on {expected}, got {other:?}"),
        }
    }

    #[test]
    fn test_migrate_handler_new() {
        let config = create_valid_config();
        let handler = MigrateCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_migrate_handler_zero_rollback_steps() {
        let handler = MigrateCommandHandler::new(create_valid_config());
        assert_validation_field(handler.execute(false, Some(0)).await, "rollback_steps");
    }

    #[tokio::test]
    async fn test_migrate_handler_rejects_memory_backend() {
        let mut config = create_valid_config();
        config.database.backend = StorageBackend::Memory;
        let handler = MigrateCommandHandler::new(config);

        assert_validation_field(handler.execute(false, None).await, "database.backend");
        assert_validation_field(handler.execute(true, None).await, "database.backend");
    }

    #[tokio::test]
    async fn test_migrate_handler_rejects_bad_url_before_connecting() {
        let mut config = create_valid_config();
        config.database.url = "mysql://localhost/users".to_string();
        let handler = MigrateCommandHandler::new(config);

        match handler.execute(true, None).await {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, "database.url"),
            other => panic!("Expected configuration error, got {other:?}"),
        }
    }
}
