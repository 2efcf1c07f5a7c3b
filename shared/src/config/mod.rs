//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing and cookie configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, CookieConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut auth = AuthConfig::from_env();
        if environment.is_production() {
            auth.cookies.secure = true;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth,
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Configuration problems worth reporting at startup
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.auth.jwt.is_using_default_secret() {
            warnings.push("token secrets are using built-in defaults".to_string());
        }
        if self.auth.jwt.access_token_expiry >= self.auth.jwt.refresh_token_expiry {
            warnings.push("access token lifetime is not shorter than refresh token lifetime".to_string());
        }
        if self.environment.is_production() && self.cors.allowed_origins.is_empty() {
            warnings.push("no CORS origins configured".to_string());
        }
        warnings
    }
}
