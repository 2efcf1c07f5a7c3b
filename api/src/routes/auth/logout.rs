use actix_web::{web, HttpResponse};

use rentals_core::repositories::{ListingRepository, UserRepository};

use crate::app::AppState;
use crate::dto::MessageResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::session::removal_cookie;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/auth/logout
///
/// Forgets the stored refresh token digest so the refresh token can no
/// longer renew access, and clears both cookies.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: No valid session
pub async fn logout<L, U>(state: web::Data<AppState<L, U>>, auth: AuthContext) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    match state.auth_service.logout(auth.user_id()).await {
        Ok(()) => {
            let cookies = &state.cookies;
            HttpResponse::Ok()
                .cookie(removal_cookie(&cookies.access_cookie_name, cookies.secure))
                .cookie(removal_cookie(&cookies.refresh_cookie_name, cookies.secure))
                .json(MessageResponse::new("Logged out successfully"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
