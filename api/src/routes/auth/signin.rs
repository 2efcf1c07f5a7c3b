use actix_web::{web, HttpResponse};
use chrono::Utc;
use validator::Validate;

use rentals_core::repositories::{ListingRepository, UserRepository};

use crate::app::AppState;
use crate::dto::SigninRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

use super::set_session_cookies;

/// Handler for POST /api/v1/auth/signin
///
/// Checks the credentials and starts a new session. The refresh token of any
/// earlier session of the same account stops working.
///
/// # Response
///
/// ## Success (200 OK)
/// The account, with both session cookies set.
///
/// ## Errors
/// - 400 Bad Request: Invalid body or wrong credentials
pub async fn signin<L, U>(
    state: web::Data<AppState<L, U>>,
    request: web::Json<SigninRequest>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .sign_in(&request.email, &request.password, Utc::now())
        .await
    {
        Ok((user, tokens)) => {
            let mut response = HttpResponse::Ok();
            set_session_cookies(&mut response, &state.cookies, &tokens);
            response.json(user)
        }
        Err(error) => handle_domain_error(&error),
    }
}
