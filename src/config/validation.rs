//! `validate()` for every settings section
//!
//! Sections check themselves in file order and stop at the first bad value,
//! so the error always names one dotted key.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings, StorageBackend,
};
use crate::logger::VALID_LEVELS;

const LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// URL schemes accepted by the postgres backend
const POSTGRES_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

fn ensure(ok: bool, field: &str, message: impl Into<String>) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::validation(field.to_string(), message.into()))
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            self.port != 0,
            "server.port",
            "Port must be between 1 and 65535.",
        )?;
        ensure(
            self.request_timeout > 0,
            "server.request_timeout",
            "Request timeout must be at least 1 second.",
        )
    }
}

impl DatabaseConfig {
    /// The URL only matters to the postgres backend; pool sizing is checked
    /// for both so switching `backend` never needs other edits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StorageBackend::Postgres {
            ensure(
                !self.url.is_empty(),
                "database.url",
                "Database URL is required for the postgres backend.",
            )?;
            ensure(
                POSTGRES_SCHEMES.iter().any(|scheme| self.url.starts_with(scheme)),
                "database.url",
                "Expected postgres://[user:password@]host[:port]/database",
            )?;
        }

        ensure(
            self.max_connections > 0,
            "database.max_connections",
            "Pool needs at least one connection.",
        )?;
        ensure(
            self.min_connections > 0,
            "database.min_connections",
            "Keep at least one idle connection.",
        )?;
        ensure(
            self.min_connections <= self.max_connections,
            "database.min_connections",
            format!(
                "{} idle connections exceed the pool size of {}.",
                self.min_connections, self.max_connections
            ),
        )?;
        ensure(
            self.connection_timeout > 0,
            "database.connection_timeout",
            "Connection timeout must be at least 1 second.",
        )
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.enabled || !self.path.trim().is_empty(),
            "logger.file.path",
            "A path is required when file output is enabled.",
        )?;
        ensure(
            LOG_FORMATS.contains(&self.format.to_lowercase().as_str()),
            "logger.file.format",
            format!(
                "Unknown format '{}', expected one of {}",
                self.format,
                LOG_FORMATS.join(", ")
            ),
        )
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            VALID_LEVELS.contains(&self.level.to_lowercase().as_str()),
            "logger.level",
            format!(
                "Unknown level '{}', expected one of {}",
                self.level,
                VALID_LEVELS.join(", ")
            ),
        )?;
        ensure(
            self.console.enabled || self.file.enabled,
            "logger",
            "Enable console or file output.",
        )?;
        self.file.validate()
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()
    }
}
