//! Shared setup for the API integration tests

#![allow(dead_code)]

use actix_web::{cookie::Cookie, dev::ServiceResponse, web};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use rentals_api::app::AppState;
use rentals_core::domain::entities::{Listing, NewListing, NewUser, Role, SessionTokens, User};
use rentals_core::repositories::{
    ListingRepository, MockListingRepository, MockUserRepository, UserRepository,
};
use rentals_core::services::auth::hash_password;
use rentals_core::services::{AuthServiceConfig, TokenService, TokenServiceConfig};
use rentals_shared::{CookieConfig, Coordinate};

pub const PASSWORD: &str = "password123";
pub const ACCESS_TTL: i64 = 900;

pub type TestState = AppState<MockListingRepository, MockUserRepository>;

pub struct TestContext {
    pub users: Arc<MockUserRepository>,
    pub listings: Arc<MockListingRepository>,
    pub tokens: Arc<TokenService>,
    pub state: web::Data<TestState>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(MockUserRepository::new());
        let listings = Arc::new(MockListingRepository::new());
        let tokens = Arc::new(
            TokenService::new(TokenServiceConfig {
                access_secret: "api-access-secret".to_string(),
                refresh_secret: "api-refresh-secret".to_string(),
                access_token_ttl_seconds: ACCESS_TTL,
                refresh_token_ttl_seconds: 86400,
                ..Default::default()
            })
            .unwrap(),
        );

        let state = web::Data::new(AppState::new(
            listings.clone(),
            users.clone(),
            tokens.clone(),
            AuthServiceConfig::fast(),
            CookieConfig::default(),
        ));

        Self {
            users,
            listings,
            tokens,
            state,
        }
    }

    pub async fn seed_user(&self, email: &str, role: Role) -> User {
        self.users
            .create(NewUser {
                email: email.to_string(),
                name: Some(email.split('@').next().unwrap_or(email).to_string()),
                password_hash: hash_password(PASSWORD, 4).unwrap(),
                role,
                photo: None,
            })
            .await
            .unwrap()
    }

    pub async fn sign_in(&self, user: &User) -> SessionTokens {
        self.sign_in_at(user, Utc::now()).await
    }

    pub async fn sign_in_at(&self, user: &User, now: DateTime<Utc>) -> SessionTokens {
        self.state
            .auth_service
            .start_session(user, now)
            .await
            .unwrap()
    }

    pub async fn seed_listing(&self, owner_id: i64, name: &str, rooms: i32, rent: i32) -> Listing {
        self.listings
            .create(NewListing {
                name: name.to_string(),
                description: "Sunny apartment".to_string(),
                floor_area: 60,
                rent,
                rooms,
                address: "Main Street 1".to_string(),
                photo: None,
                available: true,
                location: Coordinate::new(44.8, 20.4),
                owner_id,
            })
            .await
            .unwrap()
    }
}

pub fn access_cookie(tokens: &SessionTokens) -> Cookie<'static> {
    Cookie::new("access_token", tokens.access.token.clone())
}

pub fn refresh_cookie(tokens: &SessionTokens) -> Cookie<'static> {
    Cookie::new("refresh_token", tokens.refresh.token.clone())
}

/// Value of a cookie set by the response
pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}
