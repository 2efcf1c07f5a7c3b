//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: i64,

    /// Unique login email
    pub email: String,

    /// Display name
    pub name: Option<String>,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Account role
    pub role: Role,

    /// Avatar URL
    pub photo: Option<String>,

    /// SHA-256 digest of the currently valid refresh token
    #[serde(skip_serializing, default)]
    pub refresh_token_hash: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Checks if the user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Checks if the user currently holds a renewable session
    pub fn has_active_session(&self) -> bool {
        self.refresh_token_hash.is_some()
    }

    /// Apply a partial profile update
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(name) = changes.name {
            self.name = Some(name);
        }
        if let Some(photo) = changes.photo {
            self.photo = Some(photo);
        }
        self.updated_at = Utc::now();
    }
}

/// Data required to persist a new account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub photo: Option<String>,
}

/// Account registration input with a plain-text password
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
    pub role: Role,
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub photo: Option<String>,
}

/// Filter for the account listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
}

impl UserFilter {
    /// Checks a user against the filter
    pub fn matches(&self, user: &User) -> bool {
        match &self.name {
            Some(needle) => user
                .name
                .as_deref()
                .map(|name| name.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: 7,
            email: "jane@example.com".to_string(),
            name: Some("Jane Doe".to_string()),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::Realtor,
            photo: None,
            refresh_token_hash: Some("digest".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_secrets_are_not_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token_hash").is_none());
        assert_eq!(json["role"], 2);
        assert_eq!(json["email"], "jane@example.com");
    }

    #[test]
    fn test_apply_changes() {
        let mut user = sample_user();
        user.apply(UserChanges {
            name: Some("Jane Smith".to_string()),
            ..Default::default()
        });

        assert_eq!(user.name.as_deref(), Some("Jane Smith"));
        assert_eq!(user.email, "jane@example.com");
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive() {
        let user = sample_user();
        let filter = UserFilter {
            name: Some("jane".to_string()),
        };
        assert!(filter.matches(&user));

        let filter = UserFilter {
            name: Some("bob".to_string()),
        };
        assert!(!filter.matches(&user));
        assert!(UserFilter::default().matches(&user));
    }
}
