//! Business services containing domain logic and use cases.

pub mod auth;
pub mod listing;
pub mod session;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use listing::ListingService;
pub use session::{
    RejectReason, SessionAuthenticator, SessionCredentials, SessionGuard, SessionOutcome,
};
pub use token::{TokenService, TokenServiceConfig};
pub use user::UserService;
