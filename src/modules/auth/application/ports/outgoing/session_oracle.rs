use async_trait::async_trait;

use crate::auth::application::domain::entities::SessionUser;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session service unavailable: {0}")]
    Unavailable(String),
}

/// Answers "is somebody signed in right now?".
///
/// `Ok(None)` means no session (or one the auth service no longer accepts);
/// `Err` means the question could not be answered.
#[async_trait]
pub trait SessionOracle: Send + Sync {
    async fn current_user(&self) -> Result<Option<SessionUser>, SessionError>;
}
