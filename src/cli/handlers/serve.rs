//! Serve command handler
//!
//! Starts the HTTP server, or with `--dry-run` only checks the merged
//! configuration and reports what would be started.

use crate::config::{Environment, Settings, StorageBackend};
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Execute the serve command with optional dry-run support
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config.clone(), self.environment)
            .run()
            .await
            .map_err(Into::into)
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Environment: {}", self.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.database.backend {
            StorageBackend::Postgres => {
                println!("✓ Storage backend: postgres (database URL is configured)");
                if self.config.database.auto_migrate {
                    println!("✓ Pending migrations would be applied at startup");
                }
            }
            StorageBackend::Memory => {
                println!("✓ Storage backend: memory (records are not persisted)");
            }
        }
        println!("✓ Logger configuration is valid");

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
