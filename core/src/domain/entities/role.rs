//! Account roles and their wire encoding.

use serde::{Deserialize, Serialize};

/// Role assigned to every account
///
/// Roles travel as integers (`1`, `2`, `3`) in token claims and API payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Role {
    /// Browses listings and manages their own profile
    Client,
    /// Publishes and maintains their own listings
    Realtor,
    /// Unrestricted access
    Admin,
}

impl Role {
    /// Integer code used in claims, payloads and storage
    pub fn code(self) -> i16 {
        match self {
            Role::Client => 1,
            Role::Realtor => 2,
            Role::Admin => 3,
        }
    }

    /// Decode a raw role code, `None` for anything unrecognized
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Role::Client),
            2 => Some(Role::Realtor),
            3 => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl TryFrom<i16> for Role {
    type Error = String;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Role::from_code(code).ok_or_else(|| format!("unknown role code: {}", code))
    }
}

impl From<Role> for i16 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Realtor => write!(f, "realtor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}
