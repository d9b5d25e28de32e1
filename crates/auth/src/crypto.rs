use super::*;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use jsonwebtoken::errors::ErrorKind;
use std::time::Duration;
use std::time::SystemTime;

/// Why a session token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token signature")]
    Signature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::Signature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}

/// HS256 session token codec bound to a single signing secret.
///
/// There is no key rotation window: tokens signed under any other secret
/// fail with [`TokenError::Signature`].
pub struct Crypto {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl Crypto {
    /// Lifetimes beyond [`rms_core::MAX_TOKEN_LIFETIME_HOURS`] are clamped to it.
    pub fn new(secret: &[u8], lifetime_hours: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is judged against the caller's clock in `verify`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            lifetime: Duration::from_secs(
                lifetime_hours.min(rms_core::MAX_TOKEN_LIFETIME_HOURS) * 3600,
            ),
        }
    }
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
    pub fn issue(
        &self,
        subject: &str,
        class: Class,
        now: SystemTime,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.encode(&Claims::new(subject, class, now, self.lifetime))
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }
    /// Checks signature and structure, but not expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
    pub fn verify(&self, token: &str, now: SystemTime) -> Result<Claims, TokenError> {
        self.decode(token).and_then(|claims| match claims.expired(now) {
            true => Err(TokenError::Expired),
            false => Ok(claims),
        })
    }
    /// Storage key for a token string. Revocations never persist the token itself.
    pub fn fingerprint(token: &str) -> Vec<u8> {
        use sha2::Digest;
        sha2::Sha256::digest(token.as_bytes()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rms_core::from_unix;

    const ISSUED: i64 = 1_700_000_000;

    fn crypto() -> Crypto {
        Crypto::new(b"test-secret", 24)
    }
    fn token(crypto: &Crypto, class: Class) -> (String, String) {
        let subject = uuid::Uuid::now_v7().to_string();
        let token = crypto.issue(&subject, class, from_unix(ISSUED)).unwrap();
        (subject, token)
    }

    #[test]
    fn verifies_issued_token() {
        let ref crypto = crypto();
        let (subject, ref token) = token(crypto, Class::Admin);
        let claims = crypto.verify(token, from_unix(ISSUED)).unwrap();
        assert_eq!(claims.subject(), subject);
        assert_eq!(claims.class(), Class::Admin);
        assert_eq!(claims.iat, ISSUED);
        assert_eq!(claims.exp, ISSUED + 24 * 3600);
    }
    #[test]
    fn expires_exactly_at_lifetime() {
        let ref crypto = crypto();
        let (_, ref token) = token(crypto, Class::User);
        let exp = ISSUED + 24 * 3600;
        assert!(crypto.verify(token, from_unix(exp - 1)).is_ok());
        assert_eq!(crypto.verify(token, from_unix(exp)), Err(TokenError::Expired));
        assert_eq!(crypto.verify(token, from_unix(exp + 1)), Err(TokenError::Expired));
        assert!(crypto.decode(token).is_ok());
    }
    #[test]
    fn rejects_foreign_secret() {
        let ref rotated = Crypto::new(b"rotated-secret", 24);
        let (_, ref token) = token(&crypto(), Class::User);
        assert_eq!(
            rotated.verify(token, from_unix(ISSUED)),
            Err(TokenError::Signature)
        );
    }
    #[test]
    fn rejects_spliced_payload() {
        let ref crypto = crypto();
        let (_, ref user) = token(crypto, Class::User);
        let (_, ref admin) = token(crypto, Class::Admin);
        let user = user.split('.').collect::<Vec<_>>();
        let admin = admin.split('.').collect::<Vec<_>>();
        let ref forged = format!("{}.{}.{}", user[0], admin[1], user[2]);
        assert_eq!(
            crypto.verify(forged, from_unix(ISSUED)),
            Err(TokenError::Signature)
        );
    }
    #[test]
    fn rejects_garbage() {
        let ref crypto = crypto();
        for garbage in ["", "not-a-token", "a.b.c", "\u{0}\u{1}\u{2}"] {
            assert_eq!(
                crypto.verify(garbage, from_unix(ISSUED)),
                Err(TokenError::Malformed)
            );
        }
    }
    #[test]
    fn clamps_absurd_lifetimes() {
        let ref crypto = Crypto::new(b"test-secret", u64::MAX);
        let max = rms_core::MAX_TOKEN_LIFETIME_HOURS;
        assert_eq!(crypto.lifetime(), Duration::from_secs(max * 3600));
        let token = crypto.issue("1", Class::User, from_unix(ISSUED)).unwrap();
        let claims = crypto.verify(&token, from_unix(ISSUED)).unwrap();
        assert_eq!(claims.exp, ISSUED + (max * 3600) as i64);
    }
    #[test]
    fn fingerprints_exact_string() {
        assert_eq!(Crypto::fingerprint("abc"), Crypto::fingerprint("abc"));
        assert_ne!(Crypto::fingerprint("abc"), Crypto::fingerprint("abd"));
        assert_eq!(Crypto::fingerprint("abc").len(), 32);
    }
}
