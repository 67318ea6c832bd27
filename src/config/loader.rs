//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml`
//! 3. `local.toml`
//! 4. `USERS_*` variables, with `__` between nested keys
//!    (`USERS_SERVER__PORT` sets `server.port`)
//!
//! In single-file mode (`USERS_CONFIG_FILE` or `--config`) the named file
//! replaces the three TOML layers; environment variables still apply.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "USERS_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "USERS_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "USERS";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Reads `USERS_CONFIG_DIR`, `USERS_CONFIG_FILE` and `USERS_APP_ENV`.
    ///
    /// # Errors
    ///
    /// `MutualExclusivityError` when both the directory and the file
    /// variables are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{CONFIG_DIR_ENV} and {CONFIG_FILE_ENV} cannot both be set. \
                 Use {CONFIG_DIR_ENV} for layered configuration or \
                 {CONFIG_FILE_ENV} for a single configuration file."
            )));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Switch to single-file mode; used for `--config`.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Replace the environment read from `USERS_APP_ENV`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Merge every source, deserialize and validate.
    ///
    /// # Errors
    ///
    /// `FileNotFound` for a missing required file, `ParseError` when the
    /// merged values do not fit [`Settings`], and `ValidationError` from
    /// [`Settings::validate`].
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let builder = self
            .file_sources()
            .into_iter()
            .try_fold(Config::builder(), |builder, (path, required)| {
                add_file_source(builder, &path, required)
            })?;

        let settings: Settings = add_env_source(builder)
            .build()?
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        settings.validate()?;

        Ok(settings)
    }

    /// TOML files to merge, lowest precedence first, with whether each is
    /// required.
    fn file_sources(&self) -> Vec<(PathBuf, bool)> {
        if let Some(config_file) = &self.config_file {
            return vec![(config_file.clone(), true)];
        }

        vec![
            (self.config_dir.join("default.toml"), true),
            (
                self.config_dir
                    .join(format!("{}.toml", self.environment.as_str())),
                false,
            ),
            (self.config_dir.join("local.toml"), false),
        ]
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(path));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}

fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .ignore_empty(true)
            .try_parsing(true),
    )
}
