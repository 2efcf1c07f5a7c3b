//! CORS middleware configuration for cross-origin requests.
//!
//! The browser client sends its session cookies with every request, so
//! credentials are supported and origins must be listed explicitly.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use rentals_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the configured client origins.
///
/// In development an empty origin list falls back to allowing any origin.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-refresh-token"),
        ])
        .max_age(config.max_age);

    if config.allowed_origins.is_empty() && !environment.is_production() {
        log::info!("Configuring permissive CORS for {}", environment);
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
