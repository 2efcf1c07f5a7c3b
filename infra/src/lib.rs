//! # Infrastructure Layer
//!
//! Concrete persistence for the Rentals backend: a PostgreSQL connection
//! pool, schema migrations and the SQLx implementations of the core
//! repository traits.

use rentals_core::errors::DomainError;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

pub use database::{DatabasePool, PgListingRepository, PgUserRepository, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Database {
            message: err.to_string(),
        }
    }
}
