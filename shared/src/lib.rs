//! Shared utilities and common types for the Rentals server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Common type definitions (pagination, coordinates)

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, JwtConfig, CookieConfig,
    ServerConfig, CorsConfig, AuthConfig, LoggingConfig
};
pub use errors::{ErrorResponse, ApiResult, error_codes};
pub use types::{Pagination, PaginatedResponse, Coordinate};
