//! Token entities for the access/refresh credential pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// Which credential a token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential presented on every request
    Access,
    /// Long-lived credential used for silent renewal
    Refresh,
}

/// Claims structure for JWT payload
///
/// Both credentials carry the same payload; they differ only in lifetime and
/// signing secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub id: i64,

    /// Raw role code
    pub role: i16,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Unique token id; keeps tokens signed within the same second distinct
    pub jti: String,
}

impl TokenClaims {
    pub fn new(subject_id: i64, role: Role, issued_at: DateTime<Utc>, ttl_seconds: i64) -> Self {
        let iat = issued_at.timestamp();
        Self {
            id: subject_id,
            role: role.code(),
            iat,
            exp: iat + ttl_seconds,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Decoded role, `None` for an unrecognized code
    pub fn role(&self) -> Option<Role> {
        Role::from_code(self.role)
    }

    /// A token is valid strictly before its expiry second
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// A freshly signed credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub kind: TokenKind,
    /// Encoded JWT
    pub token: String,
    pub claims: TokenClaims,
    /// Lifetime in seconds, used as cookie max-age
    pub max_age: i64,
}

impl IssuedToken {
    /// Expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.claims.exp, 0)
    }
}

/// The credential pair handed out on sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}
