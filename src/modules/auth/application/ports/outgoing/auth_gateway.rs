use async_trait::async_trait;

use crate::auth::application::domain::entities::SessionUser;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthGatewayError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Rejected(String),

    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

/// Password sign-in / sign-out against the hosted auth service.
///
/// Implementations keep the resulting session themselves; callers only see
/// the signed-in user.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthGatewayError>;

    async fn sign_out(&self) -> Result<(), AuthGatewayError>;
}
