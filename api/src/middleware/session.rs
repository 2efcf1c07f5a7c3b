//! Session authentication middleware for protecting API endpoints.
//!
//! Credentials are read from the access and refresh cookies, falling back to
//! the `Authorization: Bearer` and `X-Refresh-Token` headers. The request is
//! resolved by the session authenticator registered in app data. A resolved
//! subject is injected into request extensions as [`AuthContext`]; when the
//! access token had to be renewed the new one is sent back as a cookie.
//! Rejected requests are answered with a 401 before the handler runs.

use actix_web::{
    body::EitherBody,
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, InternalError},
    http::header::{HeaderName, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;
use rentals_core::{
    domain::entities::{IssuedToken, User},
    policy::RuleSet,
    services::{SessionAuthenticator, SessionCredentials, SessionOutcome},
};
use rentals_shared::CookieConfig;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::error::unauthorized_response;

/// Header carrying the refresh token for clients that cannot use cookies
pub const REFRESH_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-refresh-token");

/// The authenticated subject of a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Current persisted account of the token subject
    pub user: User,
}

impl AuthContext {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    /// Permissions of the subject
    pub fn rules(&self) -> RuleSet {
        RuleSet::for_user(&self.user)
    }
}

/// Session authentication middleware factory
pub struct SessionAuth {
    cookies: Rc<CookieConfig>,
}

impl SessionAuth {
    pub fn new(cookies: CookieConfig) -> Self {
        Self {
            cookies: Rc::new(cookies),
        }
    }
}

impl Default for SessionAuth {
    fn default() -> Self {
        Self::new(CookieConfig::default())
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            cookies: Rc::clone(&self.cookies),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    cookies: Rc<CookieConfig>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let cookies = Rc::clone(&self.cookies);

        Box::pin(async move {
            let authenticator = req
                .app_data::<web::Data<Arc<dyn SessionAuthenticator>>>()
                .cloned()
                .ok_or_else(|| ErrorInternalServerError("Session authentication not configured"))?;

            let credentials = extract_credentials(&req, &cookies);
            let (subject, renewed_access) =
                match authenticator.authenticate(&credentials, Utc::now()).await {
                    SessionOutcome::Resolved {
                        subject,
                        renewed_access,
                    } => (subject, renewed_access),
                    SessionOutcome::Rejected(reason) => {
                        log::debug!("Rejected {} {}: {}", req.method(), req.path(), reason);
                        return Ok(req
                            .into_response(unauthorized_response())
                            .map_into_right_body());
                    }
                };

            req.extensions_mut().insert(AuthContext::new(subject));

            let mut res = service.call(req).await?;
            if let Some(token) = renewed_access {
                res.response_mut()
                    .add_cookie(&access_cookie(&cookies, &token))?;
            }
            Ok(res.map_into_left_body())
        })
    }
}

/// Collect access and refresh tokens from cookies, then headers
pub fn extract_credentials(req: &ServiceRequest, cookies: &CookieConfig) -> SessionCredentials {
    let access_token = cookie_value(req, &cookies.access_cookie_name).or_else(|| bearer_token(req));
    let refresh_token = cookie_value(req, &cookies.refresh_cookie_name).or_else(|| {
        req.headers()
            .get(REFRESH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    });

    SessionCredentials::new(access_token, refresh_token)
}

fn cookie_value(req: &ServiceRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Extracts Bearer token from Authorization header
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .map(|s| s.to_string())
}

/// HttpOnly cookie carrying a token for its whole lifetime
pub fn token_cookie(name: &str, token: &IssuedToken, secure: bool) -> Cookie<'static> {
    Cookie::build(name.to_string(), token.token.clone())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(token.max_age))
        .finish()
}

/// Cookie for a (re)issued access token
pub fn access_cookie(cookies: &CookieConfig, token: &IssuedToken) -> Cookie<'static> {
    token_cookie(&cookies.access_cookie_name, token, cookies.secure)
}

/// Cookie for a refresh token
pub fn refresh_cookie(cookies: &CookieConfig, token: &IssuedToken) -> Cookie<'static> {
    token_cookie(&cookies.refresh_cookie_name, token, cookies.secure)
}

/// Expired, empty cookie that makes the browser drop `name`
pub fn removal_cookie(name: &str, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(name.to_string(), "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                InternalError::from_response("missing session", unauthorized_response()).into()
            });

        ready(result)
    }
}
