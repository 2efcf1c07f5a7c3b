pub mod auth;
pub mod listings;
pub mod users;
