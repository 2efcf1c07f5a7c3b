//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use rentals_core::repositories::{ListingRepository, UserRepository};
use rentals_core::services::{
    AuthService, AuthServiceConfig, ListingService, SessionAuthenticator, SessionGuard,
    TokenService, UserService,
};
use rentals_shared::{error_codes, CookieConfig, CorsConfig, Environment, ErrorResponse};

use crate::middleware::{create_cors, SessionAuth};
use crate::routes::{auth, listings, users};

/// Application state that holds shared services
pub struct AppState<L, U>
where
    L: ListingRepository,
    U: UserRepository,
{
    pub auth_service: Arc<AuthService<U>>,
    pub listing_service: Arc<ListingService<L, U>>,
    pub user_service: Arc<UserService<U>>,
    pub session_guard: Arc<SessionGuard<U>>,
    pub cookies: CookieConfig,
}

impl<L, U> AppState<L, U>
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    /// Wire every service over the given repositories
    pub fn new(
        listings: Arc<L>,
        users: Arc<U>,
        tokens: Arc<TokenService>,
        auth_config: AuthServiceConfig,
        cookies: CookieConfig,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                tokens.clone(),
                auth_config.clone(),
            )),
            listing_service: Arc::new(ListingService::new(listings, users.clone())),
            user_service: Arc::new(UserService::new(users.clone(), auth_config)),
            session_guard: Arc::new(SessionGuard::new(users, tokens)),
            cookies,
        }
    }

    /// The session guard as the trait object the middleware looks up
    pub fn authenticator(&self) -> Arc<dyn SessionAuthenticator> {
        self.session_guard.clone()
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<L, U>(
    app_state: web::Data<AppState<L, U>>,
    cors: &CorsConfig,
    environment: Environment,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    let authenticator = web::Data::new(app_state.authenticator());
    let session = || SessionAuth::new(app_state.cookies.clone());

    App::new()
        .app_data(app_state.clone())
        .app_data(authenticator)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
            actix_web::error::InternalError::from_response(err, response).into()
        }))
        .wrap(create_cors(cors, environment))
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(auth::signup::<L, U>))
                        .route("/signin", web::post().to(auth::signin::<L, U>))
                        .route("/me", web::get().to(auth::me).wrap(session()))
                        .route("/logout", web::post().to(auth::logout::<L, U>).wrap(session())),
                )
                .service(
                    web::scope("/listings")
                        .route("", web::get().to(listings::list::<L, U>))
                        .route("", web::post().to(listings::create::<L, U>).wrap(session()))
                        .route("/{id}", web::get().to(listings::get::<L, U>))
                        .route("/{id}", web::patch().to(listings::update::<L, U>).wrap(session()))
                        .route("/{id}", web::delete().to(listings::delete::<L, U>).wrap(session())),
                )
                .service(
                    web::scope("/users")
                        .wrap(session())
                        .route("", web::get().to(users::list::<L, U>))
                        .route("", web::post().to(users::create::<L, U>))
                        .route("/{id}", web::get().to(users::get::<L, U>))
                        .route("/{id}", web::patch().to(users::update::<L, U>))
                        .route("/{id}", web::delete().to(users::delete::<L, U>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "rentals-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
