//! Typed view of the `[application]`, `[server]`, `[database]` and
//! `[logger]` tables.
//!
//! Every struct is `#[serde(default)]`, so a layer only has to name the keys
//! it changes and anything unset falls back to the `Default` impl below.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    /// Defaults to the crate version baked in at build time
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "users-rs".to_string(),
            version: crate::pkg_version().to_string(),
        }
    }
}

/// Listener settings for the axum server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds a request may run before it is answered with 408
    pub request_timeout: u64,
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout: 30,
        }
    }
}

/// Where user records are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL through the diesel-async pool
    #[default]
    Postgres,
    /// Process-local map, lost on shutdown
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::validation(
                "database.backend".to_string(),
                format!("Invalid storage backend '{s}'. Valid backends are: postgres, memory"),
            )),
        }
    }
}

/// Store selection plus pool sizing for the postgres backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    /// Required for the postgres backend, ignored by the memory one
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    /// Apply pending migrations before the pool is built
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connection_timeout: 30,
            auto_migrate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub enabled: bool,
    pub path: String,
    pub append: bool,
    /// `full`, `compact` or `json`; parsed when the logger is built
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "logs/users.log".to_string(),
            append: true,
            format: "json".to_string(),
        }
    }
}

/// The `[logger]` table. Kept as plain strings so validation can report
/// the offending key; [`LoggerSettings::into_logger_config`] produces the
/// typed runtime config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub level: String,
    pub console: ConsoleSettings,
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger".to_string(), e.to_string()))
    }
}

impl FileSettings {
    fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format: LogFormat = self
            .format
            .parse()
            .map_err(|e: crate::logger::LoggerError| {
                ConfigError::validation("logger.file.format".to_string(), e.to_string())
            })?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format)
            .map_err(|e| ConfigError::validation("logger.file".to_string(), e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub application: ApplicationConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logger: LoggerSettings,
}
