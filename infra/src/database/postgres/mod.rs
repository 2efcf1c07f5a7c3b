//! PostgreSQL repository implementations

pub mod filters;
pub mod listing_repository_impl;
pub mod user_repository_impl;

pub use listing_repository_impl::PgListingRepository;
pub use user_repository_impl::PgUserRepository;

use rentals_core::errors::{AuthError, DomainError};

/// Map a SQLx error to a domain error, reporting unique-email violations as
/// `EmailTaken`
pub(crate) fn map_sqlx_error(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AuthError::EmailTaken.into();
        }
    }
    tracing::error!("{}: {}", context, err);
    DomainError::Database {
        message: format!("{}: {}", context, err),
    }
}
