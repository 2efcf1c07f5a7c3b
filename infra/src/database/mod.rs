//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - Schema migrations
//! - Repository implementations

pub mod connection;
pub mod migrations;
pub mod postgres;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::{PgListingRepository, PgUserRepository};
