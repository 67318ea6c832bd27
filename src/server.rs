//! Server module for managing HTTP server lifecycle
//!
//! This module handles store selection, server startup, and graceful shutdown.

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::api::routes::create_router;
use crate::config::{Environment, Settings, StorageBackend};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::error::AppResult;
use crate::repositories::Repositories;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Start the server and run until shutdown signal
    ///
    /// # Errors
    /// - Migration or connection pool errors for the postgres backend
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        self.log_configuration();

        let repos = self.build_repositories().await?;
        let state = AppState::new(repos, self.settings.database.backend);
        let router = create_router(state, self.settings.server.request_timeout());
        info!("Router configured");

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server shutdown complete");

        Ok(())
    }

    fn log_configuration(&self) {
        info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %self.environment,
            "Application starting"
        );

        info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            request_timeout = %self.settings.server.request_timeout,
            "Server configuration loaded"
        );

        // The URL can carry credentials and is never logged.
        info!(
            backend = %self.settings.database.backend,
            max_connections = %self.settings.database.max_connections,
            min_connections = %self.settings.database.min_connections,
            connection_timeout = %self.settings.database.connection_timeout,
            auto_migrate = %self.settings.database.auto_migrate,
            "Database configuration loaded"
        );

        info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );
    }

    async fn build_repositories(&self) -> AppResult<Repositories> {
        let database = &self.settings.database;

        match database.backend {
            StorageBackend::Postgres => {
                if database.auto_migrate {
                    let applied = run_pending_migrations(&database.url).await?;
                    info!(count = applied.len(), "Applied pending migrations");
                }

                info!("Initializing database connection pool...");
                let pool = establish_async_connection_pool(database).await?;
                info!("Database connection pool initialized");

                Ok(Repositories::postgres(pool))
            }
            StorageBackend::Memory => {
                warn!("Using in-memory user store; records are lost on shutdown");
                Ok(Repositories::in_memory())
            }
        }
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// If a handler cannot be installed that branch never completes, so the
/// other signal still shuts the server down.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::UserRepository;

    #[tokio::test]
    async fn memory_backend_builds_empty_store() {
        let mut settings = Settings::default();
        settings.database.backend = StorageBackend::Memory;
        let server = Server::new(settings, Environment::Test);

        let repos = server.build_repositories().await.unwrap();

        assert!(repos.users.get_all().await.unwrap().is_empty());
    }
}
