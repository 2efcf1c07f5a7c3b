//! Inputs and results of session resolution

use crate::domain::entities::{IssuedToken, User};

/// Credentials extracted from a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionCredentials {
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Why a request could not be authenticated
///
/// Only used for logging: every rejection maps to the same 401 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No usable access token and no refresh token
    MissingCredentials,
    /// Refresh token failed signature or format checks
    InvalidRefreshToken,
    RefreshTokenExpired,
    /// Refresh token does not match the stored digest (displaced or logged out)
    RevokedRefreshToken,
    /// Token subject no longer exists
    UnknownSubject,
    /// The account store could not be read
    StoreUnavailable,
    /// A renewed access token could not be signed
    RenewalFailed,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            RejectReason::MissingCredentials => "missing credentials",
            RejectReason::InvalidRefreshToken => "invalid refresh token",
            RejectReason::RefreshTokenExpired => "refresh token expired",
            RejectReason::RevokedRefreshToken => "refresh token revoked",
            RejectReason::UnknownSubject => "unknown subject",
            RejectReason::StoreUnavailable => "account store unavailable",
            RejectReason::RenewalFailed => "access token renewal failed",
        };
        f.write_str(reason)
    }
}

/// Result of resolving a request's session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Resolved {
        subject: User,
        /// Set when the access token was renewed from the refresh token
        renewed_access: Option<IssuedToken>,
    },
    Rejected(RejectReason),
}

impl SessionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionOutcome::Resolved { .. })
    }

    pub fn subject(&self) -> Option<&User> {
        match self {
            SessionOutcome::Resolved { subject, .. } => Some(subject),
            SessionOutcome::Rejected(_) => None,
        }
    }
}
