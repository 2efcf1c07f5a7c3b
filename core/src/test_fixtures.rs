//! Entity builders shared by unit tests

use chrono::Utc;
use rentals_shared::Coordinate;

use crate::domain::entities::{Listing, ListingDraft, Role, User};

pub fn user(id: i64, role: Role) -> User {
    let now = Utc::now();
    User {
        id,
        email: format!("user{}@example.com", id),
        name: Some(format!("User {}", id)),
        password_hash: String::new(),
        role,
        photo: None,
        refresh_token_hash: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn listing(id: i64, owner_id: i64) -> Listing {
    let now = Utc::now();
    Listing {
        id,
        name: format!("Apartment {}", id),
        description: "Two bedrooms close to the park".to_string(),
        floor_area: 72,
        rent: 850,
        rooms: 2,
        address: "Park Avenue 12".to_string(),
        photo: None,
        available: true,
        location: Coordinate::new(44.81, 20.46),
        owner_id,
        created_at: now,
        updated_at: now,
    }
}

pub fn draft(name: &str) -> ListingDraft {
    ListingDraft {
        name: name.to_string(),
        description: "Quiet studio".to_string(),
        floor_area: 35,
        rent: 500,
        rooms: 1,
        address: "Elm Street 3".to_string(),
        photo: None,
        available: None,
        location: Coordinate::new(45.25, 19.84),
        owner_id: None,
    }
}

pub fn token_service() -> std::sync::Arc<crate::services::token::TokenService> {
    let config = crate::services::token::TokenServiceConfig {
        access_secret: "access-test-secret".to_string(),
        refresh_secret: "refresh-test-secret".to_string(),
        algorithm: jsonwebtoken::Algorithm::HS256,
        access_token_ttl_seconds: 900,
        refresh_token_ttl_seconds: 86400,
    };
    match crate::services::token::TokenService::new(config) {
        Ok(service) => std::sync::Arc::new(service),
        Err(e) => panic!("test token service: {}", e),
    }
}
