//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError};

use rentals_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// The subject's rule set does not allow the operation
    #[error("Forbidden resource")]
    Forbidden,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// NotFound for a resource kind and id, e.g. `Listing with id 4`
    pub fn not_found(kind: &str, id: i64) -> Self {
        DomainError::NotFound {
            resource: format!("{} with id {}", kind, id),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Forbidden => error_codes::FORBIDDEN,
            DomainError::Database { .. } => error_codes::DATABASE_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(err) => err.code(),
            DomainError::Token(err) => err.code(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
