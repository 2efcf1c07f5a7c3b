//! Tests for the session guard state machine

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rentals_shared::Pagination;
use std::sync::Arc;

use crate::domain::entities::{NewUser, Role, TokenKind, User, UserFilter};
use crate::errors::DomainError;
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::session::{
    check_access, check_refresh, check_renewal, RejectReason, SessionAuthenticator,
    SessionCredentials, SessionGuard, SessionOutcome,
};
use crate::services::token::{hash_refresh_token, TokenService};
use crate::test_fixtures::{token_service, user};

struct Fixture {
    users: Arc<MockUserRepository>,
    tokens: Arc<TokenService>,
    auth: AuthService<MockUserRepository>,
    guard: SessionGuard<MockUserRepository>,
}

fn fixture(seed: Vec<User>) -> Fixture {
    let users = Arc::new(MockUserRepository::with_users(seed));
    let tokens = token_service();
    Fixture {
        auth: AuthService::new(users.clone(), tokens.clone(), AuthServiceConfig::fast()),
        guard: SessionGuard::new(users.clone(), tokens.clone()),
        users,
        tokens,
    }
}

fn creds(access: Option<&str>, refresh: Option<&str>) -> SessionCredentials {
    SessionCredentials::new(access.map(String::from), refresh.map(String::from))
}

fn renewed_subject(outcome: &SessionOutcome) -> Option<(i64, i64)> {
    match outcome {
        SessionOutcome::Resolved {
            subject,
            renewed_access: Some(token),
        } => Some((subject.id, token.claims.id)),
        _ => None,
    }
}

#[tokio::test]
async fn test_valid_access_token_resolves_without_renewal() {
    let f = fixture(vec![user(1, Role::Client)]);
    let now = Utc::now();
    let access = f.tokens.issue(TokenKind::Access, 1, Role::Client, now).unwrap();

    let outcome = f.guard.resolve(&creds(Some(&access.token), None), now).await;
    match outcome {
        SessionOutcome::Resolved {
            subject,
            renewed_access,
        } => {
            assert_eq!(subject.id, 1);
            assert!(renewed_access.is_none());
        }
        other => panic!("expected resolution, got {:?}", other),
    }
}

#[tokio::test]
async fn test_expired_access_renews_from_matching_refresh() {
    let f = fixture(vec![user(1, Role::Realtor)]);
    let signed_in_at = Utc::now() - Duration::hours(1);
    let tokens = f.auth.start_session(&user(1, Role::Realtor), signed_in_at).await.unwrap();

    let now = Utc::now();
    let outcome = f
        .guard
        .resolve(&creds(Some(&tokens.access.token), Some(&tokens.refresh.token)), now)
        .await;

    assert_eq!(renewed_subject(&outcome), Some((1, 1)));
    if let SessionOutcome::Resolved {
        renewed_access: Some(token),
        ..
    } = &outcome
    {
        assert_eq!(token.kind, TokenKind::Access);
        assert_eq!(token.claims.role(), Some(Role::Realtor));
        assert!(f.tokens.verify(TokenKind::Access, &token.token, now).is_ok());
    }
}

#[tokio::test]
async fn test_missing_or_garbled_access_falls_back_to_refresh() {
    let f = fixture(vec![user(4, Role::Client)]);
    let now = Utc::now();
    let tokens = f.auth.start_session(&user(4, Role::Client), now).await.unwrap();

    let without_access = f.guard.resolve(&creds(None, Some(&tokens.refresh.token)), now).await;
    assert_eq!(renewed_subject(&without_access), Some((4, 4)));

    let garbled = f
        .guard
        .resolve(&creds(Some("garbage"), Some(&tokens.refresh.token)), now)
        .await;
    assert_eq!(renewed_subject(&garbled), Some((4, 4)));
}

#[tokio::test]
async fn test_renewal_does_not_rotate_refresh_token() {
    let f = fixture(vec![user(1, Role::Client)]);
    let now = Utc::now();
    let tokens = f.auth.start_session(&user(1, Role::Client), now).await.unwrap();

    for _ in 0..2 {
        let outcome = f.guard.resolve(&creds(None, Some(&tokens.refresh.token)), now).await;
        assert!(outcome.is_resolved());
    }
    let stored = f.users.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(
        stored.refresh_token_hash,
        Some(hash_refresh_token(&tokens.refresh.token))
    );
}

#[tokio::test]
async fn test_new_sign_in_revokes_previous_refresh_token() {
    let f = fixture(vec![user(1, Role::Client)]);
    let first_at = Utc::now() - Duration::seconds(30);
    let first = f.auth.start_session(&user(1, Role::Client), first_at).await.unwrap();
    let second = f
        .auth
        .start_session(&user(1, Role::Client), first_at + Duration::seconds(1))
        .await
        .unwrap();

    let now = Utc::now();
    assert_eq!(
        f.guard.resolve(&creds(None, Some(&first.refresh.token)), now).await,
        SessionOutcome::Rejected(RejectReason::RevokedRefreshToken)
    );
    assert!(f
        .guard
        .resolve(&creds(None, Some(&second.refresh.token)), now)
        .await
        .is_resolved());
}

#[tokio::test]
async fn test_sign_in_within_same_second_revokes_previous_refresh_token() {
    let f = fixture(vec![user(1, Role::Client)]);
    let at = Utc::now() - Duration::seconds(30);
    let first = f.auth.start_session(&user(1, Role::Client), at).await.unwrap();
    let second = f.auth.start_session(&user(1, Role::Client), at).await.unwrap();
    assert_ne!(first.refresh.token, second.refresh.token);

    let now = Utc::now();
    assert_eq!(
        f.guard.resolve(&creds(None, Some(&first.refresh.token)), now).await,
        SessionOutcome::Rejected(RejectReason::RevokedRefreshToken)
    );
    assert!(f
        .guard
        .resolve(&creds(None, Some(&second.refresh.token)), now)
        .await
        .is_resolved());
}

#[tokio::test]
async fn test_logout_then_sign_in_within_same_second_keeps_old_token_revoked() {
    let f = fixture(vec![user(1, Role::Client)]);
    let at = Utc::now() - Duration::seconds(30);
    let before = f.auth.start_session(&user(1, Role::Client), at).await.unwrap();
    f.auth.logout(1).await.unwrap();
    let after = f.auth.start_session(&user(1, Role::Client), at).await.unwrap();

    let now = Utc::now();
    assert_eq!(
        f.guard.resolve(&creds(None, Some(&before.refresh.token)), now).await,
        SessionOutcome::Rejected(RejectReason::RevokedRefreshToken)
    );
    assert!(f
        .guard
        .resolve(&creds(None, Some(&after.refresh.token)), now)
        .await
        .is_resolved());
}

#[tokio::test]
async fn test_concurrent_sign_ins_leave_exactly_one_valid_refresh_token() {
    let f = fixture(vec![user(1, Role::Client)]);
    let base = Utc::now() - Duration::seconds(60);
    let subject = user(1, Role::Client);

    let (a, b) = tokio::join!(
        f.auth.start_session(&subject, base),
        f.auth.start_session(&subject, base + Duration::seconds(1)),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    let now = Utc::now();
    let a_ok = f.guard.resolve(&creds(None, Some(&a.refresh.token)), now).await.is_resolved();
    let b_ok = f.guard.resolve(&creds(None, Some(&b.refresh.token)), now).await.is_resolved();
    assert!(a_ok ^ b_ok);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let f = fixture(vec![user(1, Role::Client)]);
    let now = Utc::now();
    let tokens = f.auth.start_session(&user(1, Role::Client), now).await.unwrap();

    f.auth.logout(1).await.unwrap();
    assert_eq!(
        f.guard.resolve(&creds(None, Some(&tokens.refresh.token)), now).await,
        SessionOutcome::Rejected(RejectReason::RevokedRefreshToken)
    );
}

#[tokio::test]
async fn test_no_credentials_is_rejected() {
    let f = fixture(vec![user(1, Role::Client)]);
    let outcome = f.guard.resolve(&SessionCredentials::default(), Utc::now()).await;
    assert_eq!(
        outcome,
        SessionOutcome::Rejected(RejectReason::MissingCredentials)
    );
}

#[tokio::test]
async fn test_expired_refresh_token_is_rejected() {
    let f = fixture(vec![user(1, Role::Client)]);
    let long_ago = Utc::now() - Duration::days(2);
    let tokens = f.auth.start_session(&user(1, Role::Client), long_ago).await.unwrap();

    let outcome = f
        .guard
        .resolve(&creds(Some(&tokens.access.token), Some(&tokens.refresh.token)), Utc::now())
        .await;
    assert_eq!(
        outcome,
        SessionOutcome::Rejected(RejectReason::RefreshTokenExpired)
    );
}

#[tokio::test]
async fn test_refresh_for_deleted_subject_is_rejected() {
    let f = fixture(vec![user(1, Role::Client)]);
    let now = Utc::now();
    let tokens = f.auth.start_session(&user(1, Role::Client), now).await.unwrap();
    f.users.delete(1).await.unwrap();

    assert_eq!(
        f.guard.resolve(&creds(None, Some(&tokens.refresh.token)), now).await,
        SessionOutcome::Rejected(RejectReason::UnknownSubject)
    );
    assert_eq!(
        f.guard.resolve(&creds(Some(&tokens.access.token), None), now).await,
        SessionOutcome::Rejected(RejectReason::UnknownSubject)
    );
}

#[tokio::test]
async fn test_access_token_presented_as_refresh_is_invalid() {
    let f = fixture(vec![user(1, Role::Client)]);
    let now = Utc::now();
    let access = f.tokens.issue(TokenKind::Access, 1, Role::Client, now).unwrap();

    assert_eq!(
        f.guard.resolve(&creds(None, Some(&access.token)), now).await,
        SessionOutcome::Rejected(RejectReason::InvalidRefreshToken)
    );
}

#[tokio::test]
async fn test_authenticator_trait_object() {
    let f = fixture(vec![user(1, Role::Admin)]);
    let now = Utc::now();
    let access = f.tokens.issue(TokenKind::Access, 1, Role::Admin, now).unwrap();
    let authenticator: Arc<dyn SessionAuthenticator> = Arc::new(f.guard);

    let outcome = authenticator
        .authenticate(&creds(Some(&access.token), None), now)
        .await;
    assert_eq!(outcome.subject().map(|u| u.role), Some(Role::Admin));
}

struct UnavailableStore;

#[async_trait]
impl UserRepository for UnavailableStore {
    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DomainError> {
        Err(DomainError::Database {
            message: "connection refused".to_string(),
        })
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
        unreachable!()
    }
    async fn exists_by_email(&self, _email: &str) -> Result<bool, DomainError> {
        unreachable!()
    }
    async fn list(
        &self,
        _filter: &UserFilter,
        _pagination: Pagination,
    ) -> Result<(Vec<User>, u64), DomainError> {
        unreachable!()
    }
    async fn create(&self, _user: NewUser) -> Result<User, DomainError> {
        unreachable!()
    }
    async fn update(&self, _user: User) -> Result<User, DomainError> {
        unreachable!()
    }
    async fn delete(&self, _id: i64) -> Result<bool, DomainError> {
        unreachable!()
    }
    async fn update_refresh_token(
        &self,
        _id: i64,
        _token_hash: Option<String>,
    ) -> Result<bool, DomainError> {
        unreachable!()
    }
}

#[tokio::test]
async fn test_store_failure_fails_closed() {
    let tokens = token_service();
    let guard = SessionGuard::new(Arc::new(UnavailableStore), tokens.clone());
    let now = Utc::now();
    let access = tokens.issue(TokenKind::Access, 1, Role::Client, now).unwrap();

    assert_eq!(
        guard.resolve(&creds(Some(&access.token), None), now).await,
        SessionOutcome::Rejected(RejectReason::StoreUnavailable)
    );
}

fn at(now: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    now + Duration::seconds(seconds)
}

#[test]
fn test_check_helpers() {
    let tokens = token_service();
    let now = Utc::now();
    let access = tokens.issue(TokenKind::Access, 1, Role::Client, now).unwrap();
    let refresh = tokens.issue(TokenKind::Refresh, 1, Role::Client, now).unwrap();

    assert!(check_access(&tokens, Some(&access.token), now).is_some());
    assert!(check_access(&tokens, Some(&access.token), at(now, 900)).is_none());
    assert!(check_access(&tokens, None, now).is_none());

    assert_eq!(
        check_refresh(&tokens, None, now),
        Err(RejectReason::MissingCredentials)
    );
    assert_eq!(
        check_refresh(&tokens, Some(&refresh.token), at(now, 86400)),
        Err(RejectReason::RefreshTokenExpired)
    );
    let claims = check_refresh(&tokens, Some(&refresh.token), now).unwrap();

    let digest = hash_refresh_token(&refresh.token);
    assert_eq!(check_renewal(&refresh.token, &claims, Some(&digest), now), Ok(()));
    assert_eq!(
        check_renewal(&refresh.token, &claims, None, now),
        Err(RejectReason::RevokedRefreshToken)
    );
    assert_eq!(
        check_renewal(&refresh.token, &claims, Some("other"), now),
        Err(RejectReason::RevokedRefreshToken)
    );
    assert_eq!(
        check_renewal(&refresh.token, &claims, Some(&digest), at(now, 86400)),
        Err(RejectReason::RefreshTokenExpired)
    );
}
