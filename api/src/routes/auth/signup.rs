use actix_web::{web, HttpResponse};
use chrono::Utc;
use validator::Validate;

use rentals_core::repositories::{ListingRepository, UserRepository};

use crate::app::AppState;
use crate::dto::SignupRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

use super::set_session_cookies;

/// Handler for POST /api/v1/auth/signup
///
/// Registers a client or realtor account and signs it in. Administrators
/// cannot be created here.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "jane@example.com",
///     "name": "Jane",
///     "password": "secret1",
///     "role": 2
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The new account, with `access_token` and `refresh_token` cookies set.
///
/// ## Errors
/// - 400 Bad Request: Invalid body or email already registered
/// - 403 Forbidden: Role is admin
pub async fn signup<L, U>(
    state: web::Data<AppState<L, U>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        log::debug!("Validation failed for signup request: {}", errors);
        return validation_error_response(&errors);
    }

    let user = match state.auth_service.signup(request.into()).await {
        Ok(user) => user,
        Err(error) => return handle_domain_error(&error),
    };

    match state.auth_service.start_session(&user, Utc::now()).await {
        Ok(tokens) => {
            let mut response = HttpResponse::Created();
            set_session_cookies(&mut response, &state.cookies, &tokens);
            response.json(user)
        }
        Err(error) => handle_domain_error(&error),
    }
}
