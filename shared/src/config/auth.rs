//! Authentication and session configuration

use serde::{Deserialize, Serialize};

const DEFAULT_ACCESS_SECRET: &str = "access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "refresh-secret-change-in-production";

/// JWT signing configuration for the access and refresh credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,

    /// Secret used to sign refresh tokens
    pub refresh_secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_expiry: 3600,     // 1 hour
            refresh_token_expiry: 604800,  // 7 days
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with both secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if either secret is still the built-in default
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }
}

/// Cookie settings for transporting credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Name of the access token cookie
    pub access_cookie_name: String,

    /// Name of the refresh token cookie
    pub refresh_cookie_name: String,

    /// Cookie secure flag (HTTPS only)
    #[serde(default)]
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: String::from("access_token"),
            refresh_cookie_name: String::from("refresh_token"),
            secure: false,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let cookie_defaults = CookieConfig::default();

        Self {
            jwt: JwtConfig {
                access_secret: std::env::var("ACCESS_TOKEN_SECRET")
                    .unwrap_or(defaults.access_secret),
                refresh_secret: std::env::var("REFRESH_TOKEN_SECRET")
                    .unwrap_or(defaults.refresh_secret),
                access_token_expiry: std::env::var("ACCESS_TOKEN_EXPIRATION_TIME")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.access_token_expiry),
                refresh_token_expiry: std::env::var("REFRESH_TOKEN_EXPIRATION_TIME")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.refresh_token_expiry),
                algorithm: default_algorithm(),
            },
            cookies: CookieConfig {
                access_cookie_name: std::env::var("ACCESS_TOKEN_COOKIE")
                    .unwrap_or(cookie_defaults.access_cookie_name),
                refresh_cookie_name: std::env::var("REFRESH_TOKEN_COOKIE")
                    .unwrap_or(cookie_defaults.refresh_cookie_name),
                secure: std::env::var("COOKIE_SECURE")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
            },
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 3600);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("access", "refresh")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_cookie_config_default() {
        let config = CookieConfig::default();
        assert_eq!(config.access_cookie_name, "access_token");
        assert_eq!(config.refresh_cookie_name, "refresh_token");
        assert!(!config.secure);
    }
}
