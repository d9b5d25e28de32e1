use super::*;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::SystemTime;

type CredentialMap = HashMap<(Class, String), (Principal, String)>;
type RevocationMap = HashMap<Vec<u8>, SystemTime>;

/// In-process credential and revocation store.
#[derive(Default)]
pub struct Memory {
    credentials: Mutex<CredentialMap>,
    revocations: Mutex<RevocationMap>,
}

impl Memory {
    /// Adds or replaces a principal in one namespace, keeping its id
    /// when the email is already present.
    pub fn register(&self, class: Class, email: &str, hashword: &str) -> Principal {
        let id = self
            .credentials()
            .get(&(class, email.to_string()))
            .map(|(principal, _)| principal.id().to_string())
            .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());
        let principal = Principal::new(id, email.to_string(), class);
        self.insert(principal.clone(), hashword);
        principal
    }
    /// Stores a principal exactly as given, id included.
    pub fn insert(&self, principal: Principal, hashword: &str) {
        self.credentials().insert(
            (principal.class(), principal.email().to_string()),
            (principal, hashword.to_string()),
        );
    }
    pub fn revocations(&self) -> usize {
        self.revoked_tokens().len()
    }
    fn credentials(&self) -> MutexGuard<'_, CredentialMap> {
        self.credentials
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
    fn revoked_tokens(&self) -> MutexGuard<'_, RevocationMap> {
        self.revocations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl CredentialStore for Memory {
    async fn find(
        &self,
        class: Class,
        email: &str,
    ) -> Result<Option<(Principal, String)>, StoreError> {
        Ok(self.credentials().get(&(class, email.to_string())).cloned())
    }
    async fn upsert_admin(&self, email: &str, hashword: &str) -> Result<(), StoreError> {
        self.register(Class::Admin, email, hashword);
        Ok(())
    }
}

#[async_trait::async_trait]
impl RevocationStore for Memory {
    async fn record(&self, token: &str, expires: SystemTime) -> Result<(), StoreError> {
        self.revoked_tokens()
            .entry(Crypto::fingerprint(token))
            .or_insert(expires);
        Ok(())
    }
    async fn revoked(&self, token: &str) -> Result<bool, StoreError> {
        Ok(self
            .revoked_tokens()
            .contains_key(&Crypto::fingerprint(token)))
    }
    async fn purge(&self, now: SystemTime) -> Result<u64, StoreError> {
        let mut revocations = self.revoked_tokens();
        let before = revocations.len();
        revocations.retain(|_, expires| *expires > now);
        Ok((before - revocations.len()) as u64)
    }
}
