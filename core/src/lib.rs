//! # Rentals Core
//!
//! Core business logic and domain layer for the Rentals backend.
//! This crate contains domain entities, the access policy, business services,
//! repository interfaces and error types.

pub mod domain;
pub mod errors;
pub mod policy;
pub mod repositories;
pub mod services;

#[cfg(test)]
mod test_fixtures;

// Re-export commonly used types for convenience
pub use domain::entities::{
    IssuedToken, Listing, ListingChanges, ListingDraft, ListingFilter, NewAccount, NewListing,
    NewUser, Role, SessionTokens, TokenClaims, TokenKind, User, UserChanges, UserFilter,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use policy::{build_rules, Action, ResourceKind, RuleSet, Target};
pub use repositories::{
    ListingRepository, MockListingRepository, MockUserRepository, UserRepository,
};
pub use services::{
    AuthService, AuthServiceConfig, ListingService, RejectReason, SessionAuthenticator,
    SessionCredentials, SessionGuard, SessionOutcome, TokenService, TokenServiceConfig,
    UserService,
};
