pub mod listing;
pub mod user;

pub use listing::{ListingRepository, MockListingRepository};
pub use user::{MockUserRepository, UserRepository};
