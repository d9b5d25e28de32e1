use super::*;
use std::time::SystemTime;

/// Principal storage, partitioned into one namespace per [`Class`].
/// Email uniqueness holds within a namespace, not across them.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Resolves an email within a single namespace, returning the
    /// principal beside its stored password hash.
    async fn find(
        &self,
        class: Class,
        email: &str,
    ) -> Result<Option<(Principal, String)>, StoreError>;

    /// Creates the administrator keyed by `email`, or replaces its password hash.
    async fn upsert_admin(&self, email: &str, hashword: &str) -> Result<(), StoreError>;

    /// Resolves an email across namespaces in [`Class::PRECEDENCE`] order.
    ///
    /// Only an empty result moves the search on to the next namespace;
    /// a store error ends it immediately.
    async fn lookup(&self, email: &str) -> Result<Option<(Principal, String)>, StoreError> {
        for class in Class::PRECEDENCE {
            if let Some(found) = self.find(class, email).await? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

/// Revoked session tokens, keyed by [`Crypto::fingerprint`] of the exact token string.
#[async_trait::async_trait]
pub trait RevocationStore: Send + Sync {
    /// Records a revocation. Recording an already revoked token succeeds
    /// and leaves the original record untouched.
    async fn record(&self, token: &str, expires: SystemTime) -> Result<(), StoreError>;
    async fn revoked(&self, token: &str) -> Result<bool, StoreError>;
    /// Deletes revocations of tokens that expired at or before `now`.
    async fn purge(&self, now: SystemTime) -> Result<u64, StoreError>;
}
