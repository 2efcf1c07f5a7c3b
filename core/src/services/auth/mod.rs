//! Authentication service module
//!
//! This module provides account registration, credential checks and the
//! issuing and revocation of session tokens.

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::AuthService;
