use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub code: String,
    pub name: String,
}

impl Domain {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Domain {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Explicit session context: created at login, invalidated at logout,
/// passed to the screens that need it instead of read from ambient storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub username: String,
    pub roles: Vec<String>,
    pub domain: Domain,
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(username: impl Into<String>, roles: Vec<String>, domain: Domain) -> Self {
        SessionContext {
            username: username.into(),
            roles,
            domain,
            created_at: Utc::now(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
