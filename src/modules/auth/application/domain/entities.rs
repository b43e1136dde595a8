use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Access tokens this close to expiry are treated as already expired.
const EXPIRY_SKEW_SECS: i64 = 30;

/// What a signed-in session is allowed to do.
///
/// Today every authenticated user is granted every capability; the admin
/// restriction lives in the login flow, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    UploadMedia,
}

/// The user behind the current session, as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionUser {
    pub fn capabilities(&self) -> &'static [Capability] {
        &[Capability::UploadMedia]
    }

    pub fn grants(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Case-insensitive email comparison; a user without an email never matches.
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(email.trim()))
    }
}

/// Tokens for an active session. Owned by the session store, never exposed
/// to the media libraries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

impl AuthSession {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in_secs: i64,
        user: SessionUser,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: now + Duration::seconds(expires_in_secs),
            user,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECS) >= self.expires_at
    }
}
