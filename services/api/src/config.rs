//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub cors_origin: String,
    pub travel_tables_path: Option<PathBuf>,
    pub seed_catalog: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server and Database Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1:8000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:8501".to_string());

        // --- Catalog Settings ---
        let travel_tables_path = lookup("TRAVEL_TABLES_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let seed_catalog = match lookup("SEED_CATALOG") {
            None => true,
            Some(value) => parse_flag(&value).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SEED_CATALOG".to_string(),
                    format!("'{}' is not true or false", value),
                )
            })?,
        };

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            cors_origin,
            travel_tables_path,
            seed_catalog,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_is_set() {
        let config = load(&[("DATABASE_URL", "sqlite://tripwala.db")]).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.cors_origin, "http://localhost:8501");
        assert!(config.travel_tables_path.is_none());
        assert!(config.seed_catalog);
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingVar(ref v)) if v == "DATABASE_URL"));
        assert!(matches!(
            load(&[("DATABASE_URL", "  ")]),
            Err(ConfigError::MissingVar(_))
        ));
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDRESS", "0.0.0.0:9000"),
            ("RUST_LOG", "debug"),
            ("TRAVEL_TABLES_PATH", "/etc/tripwala/tables.json"),
            ("SEED_CATALOG", "off"),
        ])
        .unwrap();
        assert_eq!(config.bind_address.port(), 9000);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(
            config.travel_tables_path,
            Some(PathBuf::from("/etc/tripwala/tables.json"))
        );
        assert!(!config.seed_catalog);
    }

    #[test]
    fn rejects_invalid_values() {
        let bad_addr = load(&[("DATABASE_URL", "sqlite::memory:"), ("BIND_ADDRESS", "nowhere")]);
        assert!(matches!(bad_addr, Err(ConfigError::InvalidValue(ref v, _)) if v == "BIND_ADDRESS"));

        let bad_flag = load(&[("DATABASE_URL", "sqlite::memory:"), ("SEED_CATALOG", "maybe")]);
        assert!(matches!(bad_flag, Err(ConfigError::InvalidValue(ref v, _)) if v == "SEED_CATALOG"));

        let bad_level = load(&[("DATABASE_URL", "sqlite::memory:"), ("RUST_LOG", "chatty")]);
        assert!(matches!(bad_level, Err(ConfigError::InvalidValue(ref v, _)) if v == "RUST_LOG"));
    }
}
