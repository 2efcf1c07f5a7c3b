//! Request and query DTOs for the HTTP surface

pub mod auth;
pub mod listing;
pub mod user;

pub use auth::{MessageResponse, SigninRequest, SignupRequest};
pub use listing::{CreateListingRequest, ListingQuery, LocationDto, UpdateListingRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, UserQuery};
