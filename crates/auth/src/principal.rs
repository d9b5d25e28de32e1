use super::*;

/// Authenticated identity resolved from one of the credential namespaces.
/// The password hash travels beside it, never inside it.
///
/// Ids are opaque: whatever the owning namespace assigned, in text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal {
    id: String,
    email: String,
    class: Class,
}

impl Principal {
    pub fn new(id: String, email: String, class: Class) -> Self {
        Self { id, email, class }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn class(&self) -> Class {
        self.class
    }
}
