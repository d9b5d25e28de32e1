use super::*;
use rms_core::Clock;
use rms_core::Wall;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use std::time::SystemTime;

/// A successful login: the issued token and the principal it speaks for.
#[derive(Clone)]
pub struct Session {
    token: String,
    principal: Principal,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }
    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

/// Credential verification and session token authority.
///
/// Every operation is a stateless transaction against the stores; the
/// authority itself holds nothing mutable between requests.
pub struct Authority {
    credentials: Arc<dyn CredentialStore>,
    revocations: Arc<dyn RevocationStore>,
    crypto: Crypto,
    clock: Arc<dyn Clock>,
    deadline: Duration,
}

impl Authority {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        revocations: Arc<dyn RevocationStore>,
        crypto: Crypto,
    ) -> Self {
        Self {
            credentials,
            revocations,
            crypto,
            clock: Arc::new(Wall),
            deadline: rms_core::STORE_DEADLINE,
        }
    }
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }
    /// Bounds each store call; calls still pending at the deadline are abandoned.
    pub fn with_deadline(self, deadline: Duration) -> Self {
        Self { deadline, ..self }
    }

    /// Seeds the administrator, replacing its password if it already exists.
    pub async fn bootstrap(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let ref hashword = password::hash(password).map_err(|e| {
            log::error!("failed to hash administrator password: {}", e);
            AuthError::Internal("failed to initialize admin")
        })?;
        self.bounded(self.credentials.upsert_admin(email, hashword))
            .await
            .map_err(|e| Self::escalate(e, "failed to initialize admin"))?;
        log::info!("administrator {} initialized", email);
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let (principal, ref hashword) = match self.bounded(self.credentials.lookup(email)).await {
            Ok(Some(found)) => found,
            Ok(None) => return Err(AuthError::NotFound),
            Err(e) => return Err(Self::escalate(e, "failed to look up credentials")),
        };
        match password::verify(password, hashword) {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::Unauthenticated),
            Err(e) => {
                log::error!("unusable password hash for {} {}: {}", principal.class(), principal.id(), e);
                return Err(AuthError::Unauthenticated);
            }
        }
        let token = self
            .crypto
            .issue(principal.id(), principal.class(), self.clock.now())
            .map_err(|e| {
                log::error!("failed to sign token: {}", e);
                AuthError::Internal("failed to generate token")
            })?;
        log::debug!("issued token to {} {}", principal.class(), principal.id());
        Ok(Session { token, principal })
    }

    /// Revokes a token string without judging it first; malformed or
    /// expired strings are recorded all the same.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let expires = self.expiry(token);
        self.bounded(self.revocations.record(token, expires))
            .await
            .map_err(|e| Self::escalate(e, "failed to logout"))
    }

    /// Claims of a usable token. Every failure, including a failed
    /// revocation check, collapses to `None`.
    pub async fn validate(&self, token: &str) -> Option<Claims> {
        match self.bounded(self.revocations.revoked(token)).await {
            Ok(false) => {}
            Ok(true) => return None,
            Err(e) => {
                log::warn!("revocation check failed, rejecting token: {}", e);
                return None;
            }
        }
        self.crypto
            .verify(token, self.clock.now())
            .inspect_err(|e| log::debug!("rejecting token: {}", e))
            .ok()
    }

    /// Forgets revocations of tokens that can no longer verify anyway.
    pub async fn purge(&self) -> Result<u64, AuthError> {
        self.bounded(self.revocations.purge(self.clock.now()))
            .await
            .map_err(|e| Self::escalate(e, "failed to purge revocations"))
    }

    /// Runs [`purge`](Self::purge) on a fixed interval for the life of the runtime.
    pub fn start_purge_task(self: &Arc<Self>, every: Duration) {
        let authority = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                match authority.purge().await {
                    Ok(0) => {}
                    Ok(n) => log::info!("purged {} expired revocations", n),
                    Err(e) => log::warn!("revocation purge failed: {}", e),
                }
            }
        });
    }

    /// When a revocation stops mattering. Tokens that do not verify under
    /// the current secret get a full lifetime from now.
    fn expiry(&self, token: &str) -> SystemTime {
        self.crypto
            .decode(token)
            .map(|claims| claims.expires_at())
            .unwrap_or_else(|_| self.clock.now() + self.crypto.lifetime())
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.deadline, call)
            .await
            .unwrap_or(Err(StoreError::Cancelled))
    }

    fn escalate(e: StoreError, context: &'static str) -> AuthError {
        match e {
            StoreError::Cancelled => {
                log::warn!("{}: store call cancelled", context);
                AuthError::Cancelled
            }
            e => {
                log::error!("{}: {}", context, e);
                AuthError::Internal(context)
            }
        }
    }
}
