use clap::Parser;
use rms_auth::Crypto;
use rms_pg::Database;
use tokio_postgres::config::SslMode;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration, resolved once at startup from flags and environment.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Credential verification and session token authority",
    long_about = None
)]
pub struct Config {
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, env = "SERVER_PORT", default_value_t = 50051)]
    pub port: u16,
    #[arg(long, env = "WORKERS", default_value_t = 4)]
    pub workers: usize,

    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,
    #[arg(long, env = "DB_PASSWORD", default_value = "password", hide_env_values = true)]
    pub db_password: String,
    #[arg(long, env = "DB_NAME", default_value = "rmshop")]
    pub db_name: String,
    #[arg(long, env = "DB_SSLMODE", default_value = "disable", value_parser = sslmode)]
    pub db_sslmode: SslMode,
    /// Create the users table when absent. Only for deployments without a
    /// registration system; that system owns the table otherwise.
    #[arg(long, env = "DB_CREATE_USERS")]
    pub db_create_users: bool,

    /// Signing secret for session tokens. Changing it invalidates every outstanding token.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true, value_parser = secret)]
    pub jwt_secret: String,
    #[arg(
        long,
        env = "JWT_EXPIRY_HOURS",
        default_value_t = rms_core::TOKEN_LIFETIME_HOURS,
        value_parser = clap::value_parser!(u64).range(1..=rms_core::MAX_TOKEN_LIFETIME_HOURS)
    )]
    pub jwt_expiry_hours: u64,
    /// Reserved for refresh tokens. Nothing issues or verifies them yet.
    #[arg(long, env = "JWT_REFRESH_SECRET", hide_env_values = true)]
    pub jwt_refresh_secret: Option<String>,

    #[arg(long, env = "ADMIN_EMAIL", default_value = rms_core::ADMIN_EMAIL)]
    pub admin_email: String,
    #[arg(long, env = "ADMIN_PASSWORD", default_value = rms_core::ADMIN_PASSWORD, hide_env_values = true)]
    pub admin_password: String,

    /// Deadline for each credential or revocation store call.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = rms_core::STORE_DEADLINE.as_secs())]
    pub request_timeout_secs: u64,
    /// Interval between purges of expired revocations. 0 keeps them forever.
    #[arg(long, env = "REVOCATION_PURGE_SECS", default_value_t = 0)]
    pub revocation_purge_secs: u64,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: log::LevelFilter,
    /// Also write DEBUG logs to a timestamped file in this directory.
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
    pub fn database(&self) -> Database {
        Database {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            name: self.db_name.clone(),
            sslmode: self.db_sslmode,
        }
    }
    pub fn crypto(&self) -> Crypto {
        Crypto::new(self.jwt_secret.as_bytes(), self.jwt_expiry_hours)
    }
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
    pub fn purge_interval(&self) -> Option<Duration> {
        Some(self.revocation_purge_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

fn secret(value: &str) -> Result<String, String> {
    match value.trim().is_empty() {
        true => Err("signing secret must not be empty".to_string()),
        false => Ok(value.to_string()),
    }
}

fn sslmode(value: &str) -> Result<SslMode, String> {
    match value {
        "disable" => Ok(SslMode::Disable),
        "prefer" => Ok(SslMode::Prefer),
        "require" => Ok(SslMode::Require),
        _ => Err(format!("unsupported sslmode {}", value)),
    }
}
