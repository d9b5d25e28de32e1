use super::*;
use std::time::Duration;
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: String,
    pub cls: Class,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: &str, class: Class, issued: SystemTime, lifetime: Duration) -> Self {
        let now = rms_core::unix(issued);
        Self {
            sub: subject.to_string(),
            cls: class,
            iat: now,
            exp: now.saturating_add(lifetime.as_secs() as i64),
        }
    }
    /// Tokens stop being valid at the instant `exp` is reached.
    pub fn expired(&self, now: SystemTime) -> bool {
        rms_core::unix(now) >= self.exp
    }
    pub fn subject(&self) -> &str {
        &self.sub
    }
    pub fn class(&self) -> Class {
        self.cls
    }
    pub fn expires_at(&self) -> SystemTime {
        rms_core::from_unix(self.exp)
    }
}
