use serde::Deserialize;
use serde::Serialize;

/// Principal class, inferred from the namespace that resolved a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    Admin,
    User,
}

impl Class {
    /// Namespace search order for credential lookup.
    /// A match in an earlier namespace shadows any later one.
    pub const PRECEDENCE: [Self; 2] = [Self::Admin, Self::User];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
