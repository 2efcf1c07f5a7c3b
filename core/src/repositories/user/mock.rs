//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use chrono::Utc;
use rentals_shared::Pagination;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUser, User, UserFilter};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository backed by a map
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: AtomicI64,
}

impl MockUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a repository pre-populated with users, keeping their ids
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            users: Arc::new(RwLock::new(users.into_iter().map(|u| (u.id, u)).collect())),
            next_id: AtomicI64::new(next_id),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn list(
        &self,
        filter: &UserFilter,
        pagination: Pagination,
    ) -> Result<(Vec<User>, u64), DomainError> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users.values().filter(|u| filter.matches(u)).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken.into());
        }

        let now = Utc::now();
        let created = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            role: user.role,
            photo: user.photo,
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email && u.id != user.id) {
            return Err(AuthError::EmailTaken.into());
        }

        let existing = users
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::not_found("User", user.id))?;

        existing.email = user.email;
        existing.name = user.name;
        existing.role = user.role;
        existing.photo = user.photo;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }

    async fn update_refresh_token(
        &self,
        id: i64,
        token_hash: Option<String>,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.refresh_token_hash = token_hash;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
