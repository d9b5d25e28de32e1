//! Credential verification and session token authority.
//!
//! Authenticates administrators and users against Argon2 password hashes,
//! issues HS256 session tokens, and revokes them on logout.
//!
//! ## Identity
//!
//! - [`Principal`] — Authenticated identity in one namespace
//! - [`Class`] — Namespace of a principal: admin or user
//!
//! ## Security
//!
//! - [`Crypto`] — Session token signing and verification
//! - [`Claims`] — Session token payload
//! - [`password`] — Argon2 hashing and verification
//!
//! ## Storage
//!
//! - [`CredentialStore`] — Namespaced principal lookup, admin first
//! - [`RevocationStore`] — Revoked token list
//! - [`Memory`] — In-process implementation of both
//!
//! ## Orchestration
//!
//! - [`Authority`] — Login, logout, and token validation
mod authority;
mod claims;
mod class;
mod crypto;
mod dto;
mod error;
mod memory;
pub mod password;
mod principal;
mod store;

pub use authority::*;
pub use claims::*;
pub use class::*;
pub use crypto::*;
pub use dto::*;
pub use error::*;
pub use memory::*;
pub use principal::*;
pub use store::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
