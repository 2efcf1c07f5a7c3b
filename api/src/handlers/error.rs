//! Conversion of domain and validation errors into HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use rentals_core::errors::{AuthError, DomainError, TokenError};
use rentals_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Forbidden => StatusCode::FORBIDDEN,
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            AuthError::AdminSignupForbidden => StatusCode::FORBIDDEN,
            AuthError::InvalidCredentials | AuthError::EmailTaken => StatusCode::BAD_REQUEST,
        },
        DomainError::Token(TokenError::SigningFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    let body = if status.is_server_error() {
        log::error!("Domain Error: {:?}", error);
        ErrorResponse::new(error.code(), "An internal error occurred")
    } else {
        log::debug!("Domain Error: {:?}", error);
        let message = match error {
            DomainError::NotFound { resource } => format!("{} not found", resource),
            other => other.to_string(),
        };
        ErrorResponse::new(error.code(), message)
    };

    HttpResponse::build(status).json(body)
}

/// 400 response listing the failing fields
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(response)
}

/// Error body for requests rejected by the session middleware
pub fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        AuthError::AuthenticationFailed.to_string(),
    ))
}
