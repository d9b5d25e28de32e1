//! Credential verification and session token authority for the rmshop backend.
//!
//! ## Crates
//!
//! - [`rms_auth`] — Password hashing, session tokens, stores, and the [`Authority`]
//! - [`rms_server`] — Configuration loading and the HTTP transport
//! - `rms_pg` — PostgreSQL connectivity
//! - [`rms_core`] — Clocks, session defaults, and logging
pub use rms_auth::*;
pub use rms_core::log;
pub use rms_server::Config;
pub use rms_server::run;
