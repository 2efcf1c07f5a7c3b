//! Configuration for the token service

use jsonwebtoken::Algorithm;
use rentals_shared::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for access tokens
    pub access_secret: String,
    /// Secret for refresh tokens
    pub refresh_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Access token lifetime in seconds
    pub access_token_ttl_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            algorithm: config.algorithm.parse().unwrap_or(Algorithm::HS256),
            access_token_ttl_seconds: config.access_token_expiry,
            refresh_token_ttl_seconds: config.refresh_token_expiry,
        }
    }
}
