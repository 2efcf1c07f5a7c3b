//! User repository trait defining the interface for account persistence.
//!
//! The trait is async-first and uses `Result` for error handling. Duplicate
//! emails are reported as `AuthError::EmailTaken` so services can surface them
//! without inspecting storage-specific errors.

use async_trait::async_trait;
use rentals_shared::Pagination;

use crate::domain::entities::{NewUser, User, UserFilter};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Find a user by email (exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check if an account with the given email exists
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Page through accounts, newest first
    ///
    /// # Returns
    /// * `Ok((users, total))` - The requested page and the total number of matches
    async fn list(
        &self,
        filter: &UserFilter,
        pagination: Pagination,
    ) -> Result<(Vec<User>, u64), DomainError>;

    /// Persist a new account and return it with its generated id
    ///
    /// # Returns
    /// * `Err(DomainError::Auth(AuthError::EmailTaken))` - Email already registered
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Update the profile fields and role of an existing account
    ///
    /// The stored refresh token digest is not touched; use
    /// [`UserRepository::update_refresh_token`] for that.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete an account; owned listings go with it
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Overwrite (or clear, with `None`) the stored refresh token digest
    ///
    /// A single-row write: concurrent sign-ins race and the last write wins.
    ///
    /// # Returns
    /// * `Ok(false)` - User not found
    async fn update_refresh_token(
        &self,
        id: i64,
        token_hash: Option<String>,
    ) -> Result<bool, DomainError>;
}
