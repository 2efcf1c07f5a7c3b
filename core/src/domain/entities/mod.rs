//! Domain entities representing core business objects.

pub mod listing;
pub mod role;
pub mod token;
pub mod user;

pub use listing::{
    Listing, ListingChanges, ListingDraft, ListingFilter, NewListing, ROOMS_AT_LEAST_THRESHOLD,
};
pub use role::Role;
pub use token::{IssuedToken, SessionTokens, TokenClaims, TokenKind};
pub use user::{NewAccount, NewUser, User, UserChanges, UserFilter};
