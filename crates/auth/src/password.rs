//! Password hashing.
//!
//! New digests are Argon2id PHC strings, so algorithm, cost parameters, and
//! salt travel with the hash and every call to [`hash`] yields a different
//! string. [`verify`] also accepts the bcrypt digests written by the user
//! registration system.
use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("argon2: {0}")]
    Argon2(argon2::password_hash::Error),
    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<argon2::password_hash::Error> for Error {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self::Argon2(e)
    }
}

fn salt() -> Result<SaltString, Error> {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    Ok(SaltString::encode_b64(bytes)?)
}

pub fn hash(password: &str) -> Result<String, Error> {
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt()?)?
        .to_string())
}

/// `Ok(false)` on mismatch. `Err` when the stored digest cannot be parsed
/// or names parameters this build cannot verify.
pub fn verify(password: &str, hashword: &str) -> Result<bool, Error> {
    match hashword.starts_with("$2") {
        true => Ok(bcrypt::verify(password, hashword)?),
        false => argon2(password, hashword),
    }
}

fn argon2(password: &str, hashword: &str) -> Result<bool, Error> {
    let ref hash = PasswordHash::new(hashword)?;
    match Argon2::default().verify_password(password.as_bytes(), hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::from(e)),
    }
}
