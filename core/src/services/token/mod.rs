//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Signing access and refresh tokens with separate secrets
//! - Verifying tokens against an explicit clock
//! - Digesting refresh tokens for server-side storage

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{hash_refresh_token, refresh_token_matches, TokenService};
