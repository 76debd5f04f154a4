//! Application settings loading from config.toml and environment variables.
//!
//! Settings come from an optional TOML file with environment variables
//! taking precedence, so deployments can ship a config.toml and still
//! override individual values per environment. A `.env` file is honored
//! when present.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Pause between items of a bulk invoice delete, in milliseconds.
/// Purely rate-limit friendliness towards the storage backend.
const DEFAULT_BULK_DELETE_DELAY_MS: u64 = 250;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/paintdesk.sqlite";

/// Application configuration resolved from file and environment.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Delay between sequential deletes in a bulk invoice delete
    #[serde(default = "default_bulk_delete_delay_ms")]
    pub bulk_delete_delay_ms: u64,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

const fn default_bulk_delete_delay_ms() -> u64 {
    DEFAULT_BULK_DELETE_DELAY_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            bulk_delete_delay_ms: default_bulk_delete_delay_ms(),
        }
    }
}

/// Loads application configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the application configuration from the default location
/// (./config.toml), falling back to defaults when the file is absent, then
/// applies environment overrides (`DATABASE_URL`, `BULK_DELETE_DELAY_MS`).
///
/// # Errors
/// Returns an error if an existing config.toml cannot be parsed, or if
/// `BULK_DELETE_DELAY_MS` is set but not a number.
pub fn load_app_configuration() -> Result<AppConfig> {
    // Make .env loading non-fatal, env vars can be set externally
    dotenvy::dotenv().ok();

    let mut config = if Path::new("config.toml").exists() {
        load_config("config.toml")?
    } else {
        AppConfig::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }
    if let Ok(delay) = std::env::var("BULK_DELETE_DELAY_MS") {
        config.bulk_delete_delay_ms = delay.parse().map_err(|_| Error::Config {
            message: format!("BULK_DELETE_DELAY_MS is not a number: {delay}"),
        })?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            database_url = "sqlite::memory:"
            bulk_delete_delay_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bulk_delete_delay_ms, 10);
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("database_url = \"sqlite::memory:\"").unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bulk_delete_delay_ms, DEFAULT_BULK_DELETE_DELAY_MS);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bulk_delete_delay_ms, DEFAULT_BULK_DELETE_DELAY_MS);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("does-not-exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
