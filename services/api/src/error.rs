//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service.

use crate::config::ConfigError;
use tripwala_core::{SeedError, TablesError};

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Seeding the default catalog failed, including storage failures while seeding.
    #[error("Seed Error: {0}")]
    Seed(#[from] SeedError),

    /// The travel tables override file could not be used.
    #[error("Travel Tables Error: {0}")]
    Tables(#[from] TablesError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// The embedded schema migrations failed to apply.
    #[error("Migration Error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripwala_core::PortError;

    #[test]
    fn storage_failures_while_seeding_surface_as_seed_errors() {
        let seed = SeedError::from(PortError::Storage("disk I/O error".to_string()));
        let err = ApiError::from(seed);
        assert!(matches!(err, ApiError::Seed(SeedError::Port(PortError::Storage(_)))));
        assert_eq!(err.to_string(), "Seed Error: Storage error: disk I/O error");
    }
}
