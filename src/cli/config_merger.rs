//! Configuration merger for CLI arguments and config files
//!
//! Flags given on the command line override whatever the layered
//! configuration produced. The merged result is validated once, at the end.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of file and environment configuration
#[derive(Debug)]
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration the way the CLI asks for it
    ///
    /// `--config` switches the loader to single-file mode and `--env` replaces
    /// the environment detected from `USERS_APP_ENV`. Without either flag the
    /// loader's own defaults apply.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }

        if let Some(env) = &cli.env {
            loader = loader.with_environment(env.clone().into());
        }

        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Command-level flags win over global ones, so `serve --log-level`
    /// beats `--verbose`.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);

        if let Some(command) = &cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                dry_run: _,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }

                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }

                if let Some(level) = log_level {
                    config.logger.level = level.clone().into();
                }
            }
            // Migrations only need the database section as loaded.
            Commands::Migrate { .. } => {}
        }
    }

    /// The configuration before CLI overrides
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
