//! Errors raised while loading or validating `Settings`

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required TOML layer (`default.toml` or the `USERS_CONFIG_FILE`
    /// target) is missing.
    #[error("Required configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The merged sources do not deserialize into `Settings`.
    #[error("Failed to deserialize configuration: {0}")]
    ParseError(String),

    /// A section's `validate()` rejected a value; `field` is the dotted key,
    /// e.g. `database.url`.
    #[error("Invalid value for {field}: {message}")]
    ValidationError { field: String, message: String },

    /// `USERS_APP_ENV` holds an unknown environment name.
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// `USERS_CONFIG_DIR` and `USERS_CONFIG_FILE` were both set.
    #[error("Conflicting configuration sources: {0}")]
    MutualExclusivityError(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: &Path) -> Self {
        ConfigError::FileNotFound(path.to_path_buf())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_source() {
        let error = ConfigError::file_not_found(Path::new("config/default.toml"));
        assert_eq!(
            error.to_string(),
            "Required configuration file not found: config/default.toml"
        );

        let error = ConfigError::validation("server.port", "Port must be between 1 and 65535.");
        assert_eq!(
            error.to_string(),
            "Invalid value for server.port: Port must be between 1 and 65535."
        );
    }
}
