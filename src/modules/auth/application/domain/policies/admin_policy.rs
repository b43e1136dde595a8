use crate::shared::config::{self, ConfigError};

/// Which account counts as the portfolio owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPolicy {
    admin_email: String,
}

impl AdminPolicy {
    /// Env var: `ADMIN_EMAIL` (required).
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(&config::required("ADMIN_EMAIL")?))
    }

    pub fn new(admin_email: &str) -> Self {
        Self {
            admin_email: admin_email.trim().to_lowercase(),
        }
    }

    /// Always lowercase.
    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        email.trim().eq_ignore_ascii_case(&self.admin_email)
    }
}
