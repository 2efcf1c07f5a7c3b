//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
    /// Whether self-service registration is open
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            allow_registration: true,
        }
    }
}

impl AuthServiceConfig {
    /// Minimum bcrypt cost, for tests
    pub fn fast() -> Self {
        Self {
            bcrypt_cost: 4,
            ..Default::default()
        }
    }
}
