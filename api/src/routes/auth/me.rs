use actix_web::HttpResponse;

use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Returns the account behind the current session.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(auth.user)
}
