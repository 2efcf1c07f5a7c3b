//! Main token service implementation

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::{IssuedToken, Role, SessionTokens, TokenClaims, TokenKind};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Service for signing and verifying session tokens
///
/// Expiry is checked against the `now` passed by the caller rather than the
/// system clock, so every decision is reproducible.
pub struct TokenService {
    config: TokenServiceConfig,
    access_keys: KeyPair,
    refresh_keys: KeyPair,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// A new `TokenService` or an error for a non-HMAC algorithm
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::internal(format!(
                "unsupported token algorithm {:?}, expected an HMAC algorithm",
                config.algorithm
            )));
        }

        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            access_keys: KeyPair::from_secret(&config.access_secret),
            refresh_keys: KeyPair::from_secret(&config.refresh_secret),
            config,
            validation,
        })
    }

    /// Lifetime of a token kind in seconds
    pub fn ttl(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.config.access_token_ttl_seconds,
            TokenKind::Refresh => self.config.refresh_token_ttl_seconds,
        }
    }

    /// Sign a token of the given kind for a subject
    pub fn issue(
        &self,
        kind: TokenKind,
        subject_id: i64,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = TokenClaims::new(subject_id, role, now, self.ttl(kind));
        self.sign(kind, claims)
    }

    /// Sign a fresh token of the given kind carrying the identity in `claims`
    ///
    /// The raw role code is copied as-is, so an unrecognized role stays
    /// unrecognized.
    pub fn reissue(
        &self,
        kind: TokenKind,
        claims: &TokenClaims,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let iat = now.timestamp();
        let claims = TokenClaims {
            id: claims.id,
            role: claims.role,
            iat,
            exp: iat + self.ttl(kind),
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(kind, claims)
    }

    /// Issue the access and refresh pair for a sign-in
    pub fn issue_pair(
        &self,
        subject_id: i64,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<SessionTokens, TokenError> {
        Ok(SessionTokens {
            access: self.issue(TokenKind::Access, subject_id, role, now)?,
            refresh: self.issue(TokenKind::Refresh, subject_id, role, now)?,
        })
    }

    /// Verify signature and expiry of a token of the given kind
    pub fn verify(
        &self,
        kind: TokenKind,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, TokenError> {
        let keys = self.keys(kind);
        let data = decode::<TokenClaims>(token, &keys.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        if data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }

    fn sign(&self, kind: TokenKind, claims: TokenClaims) -> Result<IssuedToken, TokenError> {
        let header = Header::new(self.config.algorithm);
        let token = encode(&header, &claims, &self.keys(kind).encoding)
            .map_err(|_| TokenError::SigningFailed)?;

        Ok(IssuedToken {
            kind,
            token,
            claims,
            max_age: self.ttl(kind),
        })
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }
}

/// SHA-256 digest (hex) of a refresh token, as stored server-side
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time comparison of a presented refresh token against a stored digest
pub fn refresh_token_matches(presented: &str, stored_digest: &str) -> bool {
    let digest = hash_refresh_token(presented);
    constant_time_eq(digest.as_bytes(), stored_digest.as_bytes())
}
