//! Command-line surface: global flags plus the `serve` and `migrate`
//! subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CRUD service for user records
#[derive(Parser, Debug)]
#[command(name = "users-rs")]
#[command(about = "CRUD service for user records")]
#[command(long_about = "
users-rs serves a small HTTP API for creating, listing, fetching and deleting
user records, backed by PostgreSQL or an in-memory store.

EXAMPLES:
    # Start the server with default configuration
    users-rs serve

    # Start server on custom host and port
    users-rs serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    users-rs --config /path/to/config.toml serve

    # Run with the test environment (in-memory store)
    users-rs --env test serve

    # Check configuration without starting server
    users-rs serve --dry-run

    # Run database migrations
    users-rs migrate

    # Preview pending migrations
    users-rs migrate --dry-run

    # Rollback last 2 migrations
    users-rs migrate --rollback 2
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load this single TOML file instead of the layered `config/` directory
    #[arg(
        short,
        long,
        value_name = "FILE",
        value_parser = super::validation::validate_config_file_path
    )]
    pub config: Option<PathBuf>,

    /// Environment layer to load; overrides USERS_APP_ENV
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default when no subcommand is given)
    ///
    /// Builds the configured store (PostgreSQL pool or in-memory map), binds
    /// the listener and serves until Ctrl+C or SIGTERM.
    Serve {
        /// Address to bind, overrides server.host
        #[arg(
            long,
            value_name = "ADDRESS",
            value_parser = super::validation::validate_host_address
        )]
        host: Option<String>,

        /// Port to listen on, overrides server.port
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level for this run; wins over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Check the merged configuration, print a summary and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply, list or revert the embedded schema migrations (postgres only)
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert this many of the most recent migrations (1-100)
        #[arg(
            long,
            value_name = "STEPS",
            conflicts_with = "dry_run",
            value_parser = super::validation::validate_rollback_steps
        )]
        rollback: Option<u32>,
    },
}

/// Mirrors [`crate::config::Environment`] for `--env`
#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(alias = "dev")]
    Development,
    Test,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    /// Checks argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Migrate {
            dry_run: true,
            rollback: Some(_),
        }) = self.command
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        let level = match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        level.to_string()
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let result = Cli::try_parse_from(["users-rs", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["users-rs", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["users-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli =
            Cli::try_parse_from(["users-rs", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        if let Some(Commands::Serve {
            host,
            port,
            log_level: _,
            dry_run,
        }) = cli.command
        {
            assert_eq!(host, Some("0.0.0.0".to_string()));
            assert_eq!(port, Some(8080));
            assert!(!dry_run);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_migrate_command() {
        let cli = Cli::try_parse_from(["users-rs", "migrate", "--dry-run"]).unwrap();
        if let Some(Commands::Migrate { dry_run, rollback }) = cli.command {
            assert!(dry_run);
            assert!(rollback.is_none());
        } else {
            panic!("Expected Migrate command");
        }
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["users-rs", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let result = Cli::try_parse_from(["users-rs", "--verbose", "--quiet"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_migrate_rollback_bounds() {
        let cli = Cli::try_parse_from(["users-rs", "migrate", "--rollback", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Migrate {
                dry_run: false,
                rollback: Some(3)
            })
        ));

        for steps in ["0", "101", "many"] {
            assert!(Cli::try_parse_from(["users-rs", "migrate", "--rollback", steps]).is_err());
        }
    }

    #[test]
    fn test_migrate_dry_run_conflicts_with_rollback() {
        let result = Cli::try_parse_from(["users-rs", "migrate", "--dry-run", "--rollback", "1"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_env_values() {
        let cli = Cli::try_parse_from(["users-rs", "--env", "prod"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Production)));
        assert!(Cli::try_parse_from(["users-rs", "--env", "qa"]).is_err());
    }

    #[test]
    fn test_serve_log_level_and_dry_run() {
        let cli =
            Cli::try_parse_from(["users-rs", "serve", "--log-level", "warning", "--dry-run"])
                .unwrap();
        if let Some(Commands::Serve {
            log_level, dry_run, ..
        }) = cli.command
        {
            assert_eq!(log_level.map(String::from).as_deref(), Some("warn"));
            assert!(dry_run);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["users-rs", "serve", "--port", "0"]).is_err());
        assert!(Cli::try_parse_from(["users-rs", "serve", "--port", "70000"]).is_err());
    }
}
