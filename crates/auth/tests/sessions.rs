//! Login, logout, and validation behavior of the authority over in-memory stores.

use rms_auth::*;
use rms_core::Frozen;
use std::sync::Arc;
use std::time::Duration;

const SECRET: &[u8] = b"integration-secret";
const ISSUED: i64 = 1_750_000_000;
const LIFETIME_HOURS: u64 = 2;

struct Harness {
    store: Arc<Memory>,
    clock: Arc<Frozen>,
    authority: Authority,
}

impl Harness {
    async fn new() -> Self {
        let store = Arc::new(Memory::default());
        let clock = Arc::new(Frozen::at(ISSUED));
        let authority = Authority::new(
            store.clone(),
            store.clone(),
            Crypto::new(SECRET, LIFETIME_HOURS),
        )
        .with_clock(clock.clone());
        authority
            .bootstrap("admin@rmshop.com", "admin123")
            .await
            .expect("bootstrap");
        Self {
            store,
            clock,
            authority,
        }
    }
    fn user(&self, email: &str, password: &str) -> Principal {
        self.store
            .register(Class::User, email, &password::hash(password).expect("hash"))
    }
    async fn check(&self, token: &str) -> ValidateResponse {
        ValidateResponse::from(self.authority.validate(token).await)
    }
}

#[tokio::test]
async fn unknown_email_is_not_found() {
    let h = Harness::new().await;
    for email in ["nobody@rmshop.com", "", "ADMIN@RMSHOP.COM"] {
        assert_eq!(
            h.authority.login(email, "admin123").await.err(),
            Some(AuthError::NotFound)
        );
    }
}

#[tokio::test]
async fn bootstrapped_admin_logs_in() {
    let h = Harness::new().await;
    let session = h.authority.login("admin@rmshop.com", "admin123").await.unwrap();
    let response = LoginResponse::from(session.clone());
    assert_eq!(response.user_type, Class::Admin);
    assert_eq!(response.user_id, session.principal().id().to_string());
    assert_eq!(
        h.check(session.token()).await,
        ValidateResponse {
            is_valid: true,
            user_id: response.user_id,
            user_type: "admin".to_string(),
        }
    );
    assert_eq!(
        h.authority.login("admin@rmshop.com", "wrong").await.err(),
        Some(AuthError::Unauthenticated)
    );
}

#[tokio::test]
async fn bootstrap_is_idempotent() {
    let h = Harness::new().await;
    let first = h.authority.login("admin@rmshop.com", "admin123").await.unwrap();
    h.authority
        .bootstrap("admin@rmshop.com", "rotated")
        .await
        .unwrap();
    assert_eq!(
        h.authority.login("admin@rmshop.com", "admin123").await.err(),
        Some(AuthError::Unauthenticated)
    );
    let second = h.authority.login("admin@rmshop.com", "rotated").await.unwrap();
    assert_eq!(first.principal().id(), second.principal().id());
}

#[tokio::test]
async fn user_namespace_resolves_users() {
    let h = Harness::new().await;
    let user = h.user("x@y.com", "hunter22");
    let session = h.authority.login("x@y.com", "hunter22").await.unwrap();
    assert_eq!(session.principal(), &user);
    let claims = h.authority.validate(session.token()).await.unwrap();
    assert_eq!(claims.subject(), user.id());
    assert_eq!(claims.class(), Class::User);
    assert_eq!(
        h.authority.login("x@y.com", "hunter23").await.err(),
        Some(AuthError::Unauthenticated)
    );
}

#[tokio::test]
async fn registered_users_with_bcrypt_digests_log_in() {
    let h = Harness::new().await;
    let ref digest = bcrypt::hash("hunter22", 4).expect("bcrypt");
    h.store.insert(
        Principal::new("42".to_string(), "x@y.com".to_string(), Class::User),
        digest,
    );
    let session = h.authority.login("x@y.com", "hunter22").await.unwrap();
    assert_eq!(session.principal().id(), "42");
    assert_eq!(
        h.check(session.token()).await,
        ValidateResponse {
            is_valid: true,
            user_id: "42".to_string(),
            user_type: "user".to_string(),
        }
    );
    assert_eq!(
        h.authority.login("x@y.com", "hunter23").await.err(),
        Some(AuthError::Unauthenticated)
    );
}

#[tokio::test]
async fn admin_shadows_user_with_same_email() {
    let h = Harness::new().await;
    h.user("admin@rmshop.com", "user-password");
    assert_eq!(
        h.authority
            .login("admin@rmshop.com", "user-password")
            .await
            .err(),
        Some(AuthError::Unauthenticated)
    );
    let session = h.authority.login("admin@rmshop.com", "admin123").await.unwrap();
    assert_eq!(session.principal().class(), Class::Admin);
}

#[tokio::test]
async fn logout_revokes_token() {
    let h = Harness::new().await;
    h.user("x@y.com", "hunter22");
    let session = h.authority.login("x@y.com", "hunter22").await.unwrap();
    let other = h.authority.login("admin@rmshop.com", "admin123").await.unwrap();
    h.authority.logout(session.token()).await.unwrap();
    assert_eq!(h.check(session.token()).await, ValidateResponse::default());
    h.authority.logout(session.token()).await.unwrap();
    assert_eq!(h.check(session.token()).await, ValidateResponse::default());
    assert_eq!(h.store.revocations(), 1);
    assert!(h.check(other.token()).await.is_valid);
}

#[tokio::test]
async fn logout_accepts_any_string() {
    let h = Harness::new().await;
    for token in ["", "not-a-token", "a.b.c"] {
        h.authority.logout(token).await.unwrap();
        assert!(!h.check(token).await.is_valid);
    }
    assert_eq!(h.store.revocations(), 3);
}

#[tokio::test]
async fn tokens_expire_after_lifetime() {
    let h = Harness::new().await;
    let session = h.authority.login("admin@rmshop.com", "admin123").await.unwrap();
    let lifetime = Duration::from_secs(LIFETIME_HOURS * 3600);
    h.clock.advance(lifetime - Duration::from_secs(1));
    assert!(h.check(session.token()).await.is_valid);
    h.clock.advance(Duration::from_secs(2));
    assert!(!h.check(session.token()).await.is_valid);
}

#[tokio::test]
async fn foreign_tokens_are_invalid() {
    let h = Harness::new().await;
    let session = h.authority.login("admin@rmshop.com", "admin123").await.unwrap();
    let principal = session.principal();
    let forged = Crypto::new(b"some-other-secret", LIFETIME_HOURS)
        .issue(principal.id(), principal.class(), rms_core::from_unix(ISSUED))
        .unwrap();
    for token in [forged.as_str(), "", "garbage", "eyJhbGciOiJIUzI1NiJ9.e30.x"] {
        assert_eq!(h.check(token).await, ValidateResponse::default());
    }
}

#[tokio::test]
async fn secret_rotation_invalidates_outstanding_tokens() {
    let h = Harness::new().await;
    let session = h.authority.login("admin@rmshop.com", "admin123").await.unwrap();
    let rotated = Authority::new(
        h.store.clone(),
        h.store.clone(),
        Crypto::new(b"rotated-secret", LIFETIME_HOURS),
    )
    .with_clock(h.clock.clone());
    assert!(rotated.validate(session.token()).await.is_none());
}
