use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};
use std::sync::Arc;

use rentals_api::app::{create_app, AppState};
use rentals_core::services::{AuthServiceConfig, TokenService, TokenServiceConfig};
use rentals_infra::{DatabasePool, PgListingRepository, PgUserRepository};
use rentals_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.logging.level));

    info!("Starting Rentals API Server ({})", config.environment);
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    database
        .run_migrations()
        .await
        .context("failed to run database migrations")?;
    info!("{}", database.get_statistics());

    let pool = database.get_pool().clone();
    let tokens = TokenService::new(TokenServiceConfig::from(&config.auth.jwt))
        .context("invalid token configuration")?;

    let app_state = web::Data::new(AppState::new(
        Arc::new(PgListingRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
        Arc::new(tokens),
        AuthServiceConfig::default(),
        config.auth.cookies.clone(),
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let environment = config.environment;
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors, environment));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    database.close().await;
    Ok(())
}
