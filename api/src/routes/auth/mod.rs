//! Authentication route handlers
//!
//! - Registration and sign-in, both of which start a session
//! - The current account
//! - Logout

pub mod logout;
pub mod me;
pub mod signin;
pub mod signup;

pub use logout::logout;
pub use me::me;
pub use signin::signin;
pub use signup::signup;

use actix_web::HttpResponseBuilder;
use rentals_core::domain::entities::SessionTokens;
use rentals_shared::CookieConfig;

use crate::middleware::session::{access_cookie, refresh_cookie};

/// Attach both session cookies to a response
fn set_session_cookies(
    response: &mut HttpResponseBuilder,
    cookies: &CookieConfig,
    tokens: &SessionTokens,
) {
    response
        .cookie(access_cookie(cookies, &tokens.access))
        .cookie(refresh_cookie(cookies, &tokens.refresh));
}
