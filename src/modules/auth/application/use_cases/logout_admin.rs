use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::ports::outgoing::{AuthGateway, AuthGatewayError};
use crate::shared::notifications::{Notification, Notifier};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LogoutAdminError {
    #[error("Logout failed: {0}")]
    Gateway(#[from] AuthGatewayError),
}

#[async_trait]
pub trait LogoutAdminUseCase: Send + Sync {
    async fn execute(&self) -> Result<(), LogoutAdminError>;
}

pub struct LogoutAdminService<G>
where
    G: AuthGateway,
{
    gateway: G,
    notifier: Arc<dyn Notifier>,
}

impl<G> LogoutAdminService<G>
where
    G: AuthGateway,
{
    pub fn new(gateway: G, notifier: Arc<dyn Notifier>) -> Self {
        Self { gateway, notifier }
    }
}

#[async_trait]
impl<G> LogoutAdminUseCase for LogoutAdminService<G>
where
    G: AuthGateway,
{
    async fn execute(&self) -> Result<(), LogoutAdminError> {
        match self.gateway.sign_out().await {
            Ok(()) => {
                self.notifier
                    .notify(Notification::success("Logged out successfully"));
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "Sign-out failed");
                self.notifier.notify(Notification::error("Logout failed"));
                Err(err.into())
            }
        }
    }
}
