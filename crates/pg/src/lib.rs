//! PostgreSQL connectivity and schema management.
//!
//! ## Connectivity
//!
//! - [`Database`] — Resolved connection parameters
//! - [`connect()`] — Establishes a shared client from those parameters
//!
//! ## Schema
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - [`migrate()`] — Idempotent table creation
//!
//! ## Table Names
//!
//! Constants for the principal namespaces and the revocation list.
mod schema;

pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::config::SslMode;

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Connection parameters, resolved by the caller's configuration loader.
/// Not `Debug`: carries the database password.
#[derive(Clone, PartialEq, Eq)]
pub struct Database {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub sslmode: SslMode,
}

impl Database {
    /// Driver configuration. Values are set field by field, so none need quoting.
    pub fn config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .password(&self.password)
            .dbname(&self.name)
            .ssl_mode(self.sslmode);
        config
    }
}

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
/// The connection driver runs on a spawned task and logs when it stops.
pub async fn connect(database: &Database) -> Result<Arc<Client>, PgErr> {
    log::info!(
        "connecting to database {} at {}:{}",
        database.name,
        database.host,
        database.port
    );
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = database.config().connect(tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// Applies the DDL of a table, creating it and its indices when absent.
pub async fn migrate<S: Schema>(client: &Client) -> Result<(), PgErr> {
    log::debug!("ensuring table {}", S::name());
    client.batch_execute(S::creates()).await?;
    client.batch_execute(S::indices()).await
}

/// Table for administrator principals.
#[rustfmt::skip]
pub const ADMINS:      &str = "admins";
/// Table for regular user principals, owned by the registration system.
#[rustfmt::skip]
pub const USERS:       &str = "users";
/// Table for revoked session tokens.
#[rustfmt::skip]
pub const REVOCATIONS: &str = "revoked_tokens";

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_postgres::config::Host;
    #[test]
    fn config_carries_every_field_verbatim() {
        let database = Database {
            host: "db".to_string(),
            port: 6543,
            user: "shop owner".to_string(),
            password: "p a'ss\\word".to_string(),
            name: "rmshop".to_string(),
            sslmode: SslMode::Prefer,
        };
        let config = database.config();
        assert_eq!(config.get_hosts(), &[Host::Tcp("db".to_string())]);
        assert_eq!(config.get_ports(), &[6543]);
        assert_eq!(config.get_user(), Some("shop owner"));
        assert_eq!(config.get_password(), Some("p a'ss\\word".as_bytes()));
        assert_eq!(config.get_dbname(), Some("rmshop"));
        assert_eq!(config.get_ssl_mode(), SslMode::Prefer);
    }
}
