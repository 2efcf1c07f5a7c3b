//! Error types for authentication and token handling

use rentals_shared::{error_codes, ErrorResponse};
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No usable session could be established for the request
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Unknown email or wrong password; both produce the same message
    #[error("Wrong credentials provided")]
    InvalidCredentials,

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("You cannot create a user with admin privileges")]
    AdminSignupForbidden,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Token signing failed")]
    SigningFailed,
}

impl AuthError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::AuthenticationFailed => error_codes::UNAUTHORIZED,
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::EmailTaken => error_codes::EMAIL_TAKEN,
            AuthError::AdminSignupForbidden => error_codes::FORBIDDEN,
        }
    }
}

impl TokenError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::Malformed => "MALFORMED_TOKEN",
            TokenError::SigningFailed => error_codes::INTERNAL_ERROR,
        }
    }
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}
