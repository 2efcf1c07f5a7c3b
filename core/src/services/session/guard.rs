//! Session guard implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::{TokenClaims, TokenKind, User};
use crate::errors::TokenError;
use crate::repositories::UserRepository;
use crate::services::token::{refresh_token_matches, TokenService};

use super::outcome::{RejectReason, SessionCredentials, SessionOutcome};

/// Object-safe entry point used by the HTTP layer
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &SessionCredentials,
        now: DateTime<Utc>,
    ) -> SessionOutcome;
}

/// Claims of a present, correctly signed and unexpired access token
pub fn check_access(
    tokens: &TokenService,
    access_token: Option<&str>,
    now: DateTime<Utc>,
) -> Option<TokenClaims> {
    let token = access_token?;
    match tokens.verify(TokenKind::Access, token, now) {
        Ok(claims) => Some(claims),
        Err(e) => {
            debug!(error = %e, "access token not accepted");
            None
        }
    }
}

/// Verify the refresh token's signature and expiry
pub fn check_refresh(
    tokens: &TokenService,
    refresh_token: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TokenClaims, RejectReason> {
    let token = refresh_token.ok_or(RejectReason::MissingCredentials)?;
    tokens
        .verify(TokenKind::Refresh, token, now)
        .map_err(|e| match e {
            TokenError::Expired => RejectReason::RefreshTokenExpired,
            _ => RejectReason::InvalidRefreshToken,
        })
}

/// Decide whether a verified refresh token may renew the session
///
/// The token must be unexpired at `now` and its digest must equal the one
/// currently stored for the subject. Usable on its own with claims that did
/// not come from [`check_refresh`], so expiry is checked here as well.
pub fn check_renewal(
    presented: &str,
    claims: &TokenClaims,
    stored_digest: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), RejectReason> {
    if claims.is_expired_at(now) {
        return Err(RejectReason::RefreshTokenExpired);
    }
    match stored_digest {
        Some(digest) if refresh_token_matches(presented, digest) => Ok(()),
        _ => Err(RejectReason::RevokedRefreshToken),
    }
}

/// Resolves sessions against the account store
pub struct SessionGuard<U: UserRepository> {
    users: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U: UserRepository> SessionGuard<U> {
    pub fn new(users: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Run the access / refresh state machine for one request
    pub async fn resolve(
        &self,
        credentials: &SessionCredentials,
        now: DateTime<Utc>,
    ) -> SessionOutcome {
        let outcome = match check_access(&self.tokens, credentials.access_token.as_deref(), now) {
            Some(claims) => self
                .load_subject(claims.id)
                .await
                .map(|subject| SessionOutcome::Resolved {
                    subject,
                    renewed_access: None,
                }),
            None => self.renew(credentials.refresh_token.as_deref(), now).await,
        };

        outcome.unwrap_or_else(|reason| {
            debug!(%reason, "session rejected");
            SessionOutcome::Rejected(reason)
        })
    }

    async fn renew(
        &self,
        refresh_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<SessionOutcome, RejectReason> {
        let claims = check_refresh(&self.tokens, refresh_token, now)?;
        let presented = refresh_token.ok_or(RejectReason::MissingCredentials)?;
        let subject = self.load_subject(claims.id).await?;

        if let Err(reason) = check_renewal(presented, &claims, subject.refresh_token_hash.as_deref(), now) {
            if reason == RejectReason::RevokedRefreshToken {
                warn!(user_id = subject.id, "refresh token does not match the active session");
            }
            return Err(reason);
        }

        let renewed = self
            .tokens
            .reissue(TokenKind::Access, &claims, now)
            .map_err(|e| {
                warn!(error = %e, "failed to sign renewed access token");
                RejectReason::RenewalFailed
            })?;

        info!(user_id = subject.id, "access token renewed");
        Ok(SessionOutcome::Resolved {
            subject,
            renewed_access: Some(renewed),
        })
    }

    async fn load_subject(&self, id: i64) -> Result<User, RejectReason> {
        match self.users.find_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(RejectReason::UnknownSubject),
            Err(e) => {
                warn!(error = %e, user_id = id, "failed to load session subject");
                Err(RejectReason::StoreUnavailable)
            }
        }
    }
}

#[async_trait]
impl<U: UserRepository + 'static> SessionAuthenticator for SessionGuard<U> {
    async fn authenticate(
        &self,
        credentials: &SessionCredentials,
        now: DateTime<Utc>,
    ) -> SessionOutcome {
        self.resolve(credentials, now).await
    }
}
