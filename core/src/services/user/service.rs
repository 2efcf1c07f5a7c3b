//! User service implementation

use rentals_shared::{PaginatedResponse, Pagination};
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{NewAccount, NewUser, User, UserChanges, UserFilter};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::policy::{Action, ResourceKind, RuleSet};
use crate::repositories::UserRepository;
use crate::services::auth::{hash_password, AuthServiceConfig};

/// Service for managing accounts
pub struct UserService<U: UserRepository> {
    user_repository: Arc<U>,
    config: AuthServiceConfig,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(user_repository: Arc<U>, config: AuthServiceConfig) -> Self {
        Self {
            user_repository,
            config,
        }
    }

    /// List accounts (administrators only)
    pub async fn list(
        &self,
        actor: &User,
        filter: &UserFilter,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<User>> {
        RuleSet::for_user(actor).ensure(Action::Read, ResourceKind::User)?;

        let pagination = pagination.validate();
        let (users, total) = self.user_repository.list(filter, pagination).await?;
        Ok(PaginatedResponse::new(users, pagination, total))
    }

    pub async fn get(&self, actor: &User, id: i64) -> DomainResult<User> {
        let user = self.load(id).await?;
        RuleSet::for_user(actor).ensure(Action::Read, &user)?;
        Ok(user)
    }

    /// Create an account of any role (administrators only)
    pub async fn create(&self, actor: &User, account: NewAccount) -> DomainResult<User> {
        RuleSet::for_user(actor).ensure(Action::Create, ResourceKind::User)?;

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
        info!(user_id = user.id, role = %user.role, actor_id = actor.id, "account created");
        Ok(user)
    }

    pub async fn update(&self, actor: &User, id: i64, changes: UserChanges) -> DomainResult<User> {
        let mut user = self.load(id).await?;
        RuleSet::for_user(actor).ensure(Action::Update, &user)?;

        if let Some(email) = &changes.email {
            if *email != user.email && self.user_repository.exists_by_email(email).await? {
                return Err(AuthError::EmailTaken.into());
            }
        }

        user.apply(changes);
        self.user_repository.update(user).await
    }

    /// Delete an account together with its listings
    pub async fn delete(&self, actor: &User, id: i64) -> DomainResult<()> {
        let user = self.load(id).await?;
        RuleSet::for_user(actor).ensure(Action::Delete, &user)?;

        if !self.user_repository.delete(id).await? {
            return Err(DomainError::not_found("User", id));
        }
        info!(user_id = id, actor_id = actor.id, "account deleted");
        Ok(())
    }

    async fn load(&self, id: i64) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}
