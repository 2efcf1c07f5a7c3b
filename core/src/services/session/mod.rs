//! Session guard: resolves the acting account from the credential pair.
//!
//! A request is resolved from its access token when that token verifies and
//! is unexpired. Otherwise the refresh token is verified and compared with the
//! digest stored for its subject; on a match a new access token is issued and
//! the request proceeds. The refresh token itself is not rotated here, only a
//! fresh sign-in replaces it and logout clears it.

mod guard;
mod outcome;

#[cfg(test)]
mod tests;

pub use guard::{check_access, check_refresh, check_renewal, SessionAuthenticator, SessionGuard};
pub use outcome::{RejectReason, SessionCredentials, SessionOutcome};
