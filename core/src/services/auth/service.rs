//! Main authentication service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::{NewAccount, NewUser, SessionTokens, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::{hash_refresh_token, TokenService};

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// Authentication service for registration, sign-in and logout
pub struct AuthService<U: UserRepository> {
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Register a new account
    ///
    /// Self-registration cannot create administrators.
    pub async fn signup(&self, account: NewAccount) -> DomainResult<User> {
        if !self.config.allow_registration {
            return Err(DomainError::Forbidden);
        }
        if account.role.is_admin() {
            return Err(AuthError::AdminSignupForbidden.into());
        }
        if self.user_repository.exists_by_email(&account.email).await? {
            return Err(AuthError::EmailTaken.into());
        }

        let user = self
            .user_repository
            .create(NewUser {
                email: account.email,
                name: account.name,
                password_hash: hash_password(&account.password, self.config.bcrypt_cost)?,
                role: account.role,
                photo: None,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "account registered");
        Ok(user)
    }

    /// Check email and password
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            warn!(user_id = user.id, "failed sign-in attempt");
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(user)
    }

    /// Issue a token pair and make its refresh token the only valid one
    ///
    /// Overwrites the stored digest, which revokes any refresh token issued
    /// to an earlier session.
    pub async fn start_session(&self, user: &User, now: DateTime<Utc>) -> DomainResult<SessionTokens> {
        let tokens = self.token_service.issue_pair(user.id, user.role, now)?;

        let stored = self
            .user_repository
            .update_refresh_token(user.id, Some(hash_refresh_token(&tokens.refresh.token)))
            .await?;
        if !stored {
            return Err(DomainError::not_found("User", user.id));
        }

        info!(user_id = user.id, "session started");
        Ok(tokens)
    }

    /// Authenticate and start a session in one step
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<(User, SessionTokens)> {
        let user = self.authenticate(email, password).await?;
        let tokens = self.start_session(&user, now).await?;
        Ok((user, tokens))
    }

    /// Clear the stored refresh token digest
    pub async fn logout(&self, user_id: i64) -> DomainResult<()> {
        self.user_repository.update_refresh_token(user_id, None).await?;
        info!(user_id, "session ended");
        Ok(())
    }
}
