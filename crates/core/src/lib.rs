//! Clocks, session defaults, and runtime utilities for rmshop-auth.
//!
//! This crate provides the foundational types and defaults used
//! throughout the rmshop-auth workspace.

// ============================================================================
// TRAITS
// ============================================================================
/// Source of the current time.
///
/// Token issuance, expiry checks, and revocation purging all read time
/// through this trait so that expiry boundaries can be tested exactly.
pub trait Clock: Send + Sync {
    fn now(&self) -> std::time::SystemTime;
}

// ============================================================================
// CLOCKS
// ============================================================================
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering as Atomic;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// System wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wall;

impl Clock for Wall {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Manually driven clock, pinned to a unix second until moved.
#[derive(Debug, Default)]
pub struct Frozen(AtomicI64);

impl Frozen {
    pub fn at(secs: i64) -> Self {
        Self(AtomicI64::new(secs))
    }
    pub fn set(&self, secs: i64) {
        self.0.store(secs, Atomic::SeqCst);
    }
    pub fn advance(&self, by: Duration) {
        self.0.fetch_add(by.as_secs() as i64, Atomic::SeqCst);
    }
    pub fn secs(&self) -> i64 {
        self.0.load(Atomic::SeqCst)
    }
}

impl Clock for Frozen {
    fn now(&self) -> SystemTime {
        from_unix(self.secs())
    }
}

/// Seconds since the unix epoch. Times before the epoch are negative.
pub fn unix(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}

/// Inverse of [`unix`].
pub fn from_unix(secs: i64) -> SystemTime {
    match secs {
        s if s >= 0 => UNIX_EPOCH + Duration::from_secs(s as u64),
        s => UNIX_EPOCH - Duration::from_secs(s.unsigned_abs()),
    }
}

// ============================================================================
// SESSION DEFAULTS
// ============================================================================
/// Session token lifetime when none is configured.
pub const TOKEN_LIFETIME_HOURS: u64 = 24;
/// Longest session token lifetime accepted, ten years.
pub const MAX_TOKEN_LIFETIME_HOURS: u64 = 87_600;
/// Upper bound on any single credential or revocation store call.
pub const STORE_DEADLINE: Duration = Duration::from_secs(10);
/// Administrator seeded at startup when none is configured.
pub const ADMIN_EMAIL: &str = "admin@rmshop.com";
/// Password for the seeded administrator when none is configured.
pub const ADMIN_PASSWORD: &str = "admin123";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging, plus a timestamped log file when `dir` is given.
/// The file receives everything at DEBUG and above regardless of `level`.
#[cfg(feature = "server")]
pub fn log(level: log::LevelFilter, dir: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Error)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
        let ref path = dir.join(format!("{}.log", unix(SystemTime::now())));
        loggers.push(simplelog::WriteLogger::new(
            log::LevelFilter::Debug,
            config,
            std::fs::File::create(path)?,
        ));
    }
    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}
