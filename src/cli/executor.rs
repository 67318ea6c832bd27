//! Command executor for dispatching CLI commands
//!
//! Runs after parsing and configuration loading; no subcommand means `serve`.

use tracing::warn;

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::{Environment, Settings};
use crate::error::{AppError, AppResult};

/// Rollbacks larger than this get a warning before they run
const LARGE_ROLLBACK_WARNING: u32 = 50;

/// Execute a CLI command with the given settings
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    let environment = resolve_environment(cli);

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings, environment)
                .execute(*dry_run)
                .await
        }
        None => ServeCommandHandler::new(settings, environment).execute(false).await,
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

/// `--env` wins over `USERS_APP_ENV`.
pub fn resolve_environment(cli: &Cli) -> Environment {
    cli.env
        .clone()
        .map(Into::into)
        .unwrap_or_else(Environment::from_env)
}

fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve {
            host: Some(host),
            port: Some(port),
            ..
        }) if *port < 1024 && host == "0.0.0.0" => {
            warn!(port, "Binding to 0.0.0.0 on a privileged port requires root privileges");
        }
        Some(Commands::Migrate {
            rollback: Some(steps),
            ..
        }) if *steps > LARGE_ROLLBACK_WARNING => {
            warn!(steps, "Rolling back a large number of migrations");
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser;
    use clap::Parser;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/users".to_string();
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["users-rs", "serve", "--dry-run"]).unwrap();

        let result = execute_command(&cli, create_valid_config()).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_command_args() {
        let cli = Cli::try_parse_from(["users-rs", "serve", "--port", "8080"]).unwrap();
        assert!(validate_command_args(&cli).is_ok());

        let cli = Cli::try_parse_from(["users-rs", "migrate", "--rollback", "80"]).unwrap();
        assert!(validate_command_args(&cli).is_ok());
    }

    #[tokio::test]
    async fn test_validate_conflicting_args() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(5),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };

        match execute_command(&cli, create_valid_config()).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cli_arguments"),
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_environment_prefers_flag() {
        let cli = Cli::try_parse_from(["users-rs", "--env", "staging"]).unwrap();
        assert_eq!(resolve_environment(&cli), Environment::Staging);

        let cli = Cli {
            env: Some(parser::Environment::Test),
            ..Cli::try_parse_from(["users-rs"]).unwrap()
        };
        assert_eq!(resolve_environment(&cli), Environment::Test);
    }
}
