//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use rentals_core::domain::entities::{NewUser, Role, User, UserFilter};
use rentals_core::errors::DomainError;
use rentals_core::repositories::UserRepository;
use rentals_shared::Pagination;

use super::filters::{user_count_query, user_page_query, USER_COLUMNS};
use super::map_sqlx_error;

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let role_code: i16 = get(row, "role")?;
        let role = Role::from_code(role_code).ok_or_else(|| DomainError::Database {
            message: format!("Unknown role code in users table: {}", role_code),
        })?;

        Ok(User {
            id: get(row, "id")?,
            email: get(row, "email")?,
            name: get(row, "name")?,
            password_hash: get(row, "password_hash")?,
            role,
            photo: get(row, "photo")?,
            refresh_token_hash: get(row, "refresh_token_hash")?,
            created_at: get(row, "created_at")?,
            updated_at: get(row, "updated_at")?,
        })
    }
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column).map_err(|e| DomainError::Database {
        message: format!("Failed to get {}: {}", column, e),
    })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find user by email", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to check email", e))
    }

    async fn list(
        &self,
        filter: &UserFilter,
        pagination: Pagination,
    ) -> Result<(Vec<User>, u64), DomainError> {
        let rows = user_page_query(filter, pagination)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to list users", e))?;

        let total: i64 = user_count_query(filter)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count users", e))?;

        let users = rows.iter().map(Self::row_to_user).collect::<Result<Vec<_>, _>>()?;
        Ok((users, total.max(0) as u64))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let query = format!(
            "INSERT INTO users (email, name, password_hash, role, photo) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(user.role.code())
            .bind(&user.photo)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create user", e))?;

        Self::row_to_user(&row)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = format!(
            "UPDATE users SET email = $2, name = $3, role = $4, photo = $5, updated_at = now() \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.role.code())
            .bind(&user.photo)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update user", e))?;

        match row {
            Some(row) => Self::row_to_user(&row),
            None => Err(DomainError::not_found("User", user.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_refresh_token(
        &self,
        id: i64,
        token_hash: Option<String>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET refresh_token_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to store refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }
}
