use super::*;
use rms_pg::*;
use std::time::SystemTime;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Administrator namespace, written once at bootstrap.
pub struct Admins;
/// User namespace, owned by the registration system and only read here.
/// Its DDL is a development stand-in; see [`migrate_users`].
pub struct Users;
/// Revocation list.
pub struct Revocations;

impl Schema for Admins {
    fn name() -> &'static str {
        ADMINS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            ADMINS,
            " (
                id              UUID PRIMARY KEY,
                email           VARCHAR(255) UNIQUE NOT NULL,
                password_hash   TEXT NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_admins_email ON ",
            ADMINS,
            " (email);"
        )
    }
}

impl Schema for Users {
    fn name() -> &'static str {
        USERS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            USERS,
            " (
                id              UUID PRIMARY KEY,
                email           VARCHAR(255) UNIQUE NOT NULL,
                password_hash   TEXT NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
            USERS,
            " (email);"
        )
    }
}

impl Schema for Revocations {
    fn name() -> &'static str {
        REVOCATIONS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            REVOCATIONS,
            " (
                token_hash      BYTEA PRIMARY KEY,
                revoked_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
                expires_at      TIMESTAMPTZ NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_revoked_tokens_expires ON ",
            REVOCATIONS,
            " (expires_at);"
        )
    }
}

/// Creates the tables the authority owns.
pub async fn migrate(client: &Client) -> Result<(), PgErr> {
    rms_pg::migrate::<Admins>(client).await?;
    rms_pg::migrate::<Revocations>(client).await
}

/// Creates a users table for deployments without a registration system.
/// Lookups only assume `id`, `email`, and `password_hash` columns, with any id type.
pub async fn migrate_users(client: &Client) -> Result<(), PgErr> {
    rms_pg::migrate::<Users>(client).await
}

fn principal(class: Class, row: Row) -> Result<(Principal, String), PgErr> {
    Ok((
        Principal::new(row.try_get(0)?, row.try_get(1)?, class),
        row.try_get(2)?,
    ))
}

#[async_trait::async_trait]
impl CredentialStore for Client {
    async fn find(
        &self,
        class: Class,
        email: &str,
    ) -> Result<Option<(Principal, String)>, StoreError> {
        let sql = match class {
            Class::Admin => const_format::concatcp!(
                "SELECT id::text, email, password_hash FROM ",
                ADMINS,
                " WHERE email = $1"
            ),
            Class::User => const_format::concatcp!(
                "SELECT id::text, email, password_hash FROM ",
                USERS,
                " WHERE email = $1"
            ),
        };
        let row = self.query_opt(sql, &[&email]).await?;
        Ok(row.map(|row| principal(class, row)).transpose()?)
    }

    async fn upsert_admin(&self, email: &str, hashword: &str) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                ADMINS,
                " (id, email, password_hash) VALUES ($1, $2, $3)
                  ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash"
            ),
            &[&uuid::Uuid::now_v7(), &email, &hashword],
        )
        .await
        .map(|_| ())
        .map_err(StoreError::from)
    }
}

#[async_trait::async_trait]
impl RevocationStore for Client {
    async fn record(&self, token: &str, expires: SystemTime) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                REVOCATIONS,
                " (token_hash, expires_at) VALUES ($1, $2) ON CONFLICT (token_hash) DO NOTHING"
            ),
            &[&Crypto::fingerprint(token), &expires],
        )
        .await
        .map(|_| ())
        .map_err(StoreError::from)
    }

    async fn revoked(&self, token: &str) -> Result<bool, StoreError> {
        self.query_one(
            const_format::concatcp!(
                "SELECT EXISTS(SELECT 1 FROM ",
                REVOCATIONS,
                " WHERE token_hash = $1)"
            ),
            &[&Crypto::fingerprint(token)],
        )
        .await
        .map(|row| row.get::<_, bool>(0))
        .map_err(StoreError::from)
    }

    async fn purge(&self, now: SystemTime) -> Result<u64, StoreError> {
        self.execute(
            const_format::concatcp!("DELETE FROM ", REVOCATIONS, " WHERE expires_at <= $1"),
            &[&now],
        )
        .await
        .map_err(StoreError::from)
    }
}
