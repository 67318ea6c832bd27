//! Argument value parsers
//!
//! Used as clap `value_parser`s for checks clap cannot express on its own.

use std::fs;
use std::path::PathBuf;

/// Most migrations a single rollback may revert.
pub const MAX_ROLLBACK_STEPS: u32 = 100;

/// Validate port number is within valid range (1-65535)
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!("Port must be a valid number between 1 and 65535, got: '{port_str}'")
    })?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// Validate that a config file exists and can be opened
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{path_str}'"));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{path_str}'"));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{path_str}': {e}"))
}

/// Validate rollback steps is in `1..=MAX_ROLLBACK_STEPS`
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!("Rollback steps must be a valid positive number, got: '{steps_str}'")
    })?;

    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }

    if steps > MAX_ROLLBACK_STEPS {
        return Err(format!(
            "Rollback steps cannot exceed {MAX_ROLLBACK_STEPS}"
        ));
    }

    Ok(steps)
}

/// Basic host sanity check; anything that is not dotted-decimal is treated
/// as a hostname and only length-checked.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.contains(char::is_whitespace) {
        return Err("Host address cannot contain spaces".to_string());
    }

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() != 4 || parts.iter().any(|part| part.parse::<u8>().is_err()) {
            return Err(format!("Invalid IPv4 address format: '{host_str}'"));
        }
        return Ok(host.to_string());
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_port_validation() {
        assert_eq!(validate_port("1"), Ok(1));
        assert_eq!(validate_port("3000"), Ok(3000));
        assert_eq!(validate_port("65535"), Ok(65535));

        for bad in ["0", "65536", "-1", "http", ""] {
            assert!(validate_port(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_host_validation_valid_hosts() {
        for host in ["localhost", "0.0.0.0", "127.0.0.1", "10.1.2.3", "db.internal", "::1"] {
            assert_eq!(validate_host_address(host), Ok(host.to_string()));
        }
        assert_eq!(validate_host_address("  localhost "), Ok("localhost".to_string()));
    }

    #[test]
    fn test_host_validation_invalid_hosts() {
        let too_long = "a".repeat(254);
        for host in ["", "   ", "local host", "256.0.0.1", "1.2.3", too_long.as_str()] {
            assert!(validate_host_address(host).is_err(), "{host} should be rejected");
        }
    }

    #[test]
    fn test_rollback_steps_validation() {
        assert_eq!(validate_rollback_steps("1"), Ok(1));
        assert_eq!(validate_rollback_steps("100"), Ok(100));

        for bad in ["0", "101", "-3", "two"] {
            assert!(validate_rollback_steps(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_config_file_path_validation() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("custom.toml");
        let mut file = fs::File::create(&file_path).unwrap();
        writeln!(file, "[server]").unwrap();

        let path_str = file_path.to_str().unwrap();
        assert_eq!(validate_config_file_path(path_str), Ok(file_path.clone()));

        let dir_str = dir.path().to_str().unwrap();
        assert!(validate_config_file_path(dir_str).unwrap_err().contains("not a file"));

        let missing = dir.path().join("missing.toml");
        assert!(
            validate_config_file_path(missing.to_str().unwrap())
                .unwrap_err()
                .contains("does not exist")
        );
    }
}
