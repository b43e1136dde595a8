use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::application::{
    domain::entities::Capability,
    ports::outgoing::{SessionError, SessionOracle},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub capabilities: Vec<Capability>,
}

impl SessionStatus {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            email: None,
            capabilities: Vec::new(),
        }
    }
}

#[async_trait]
pub trait GetSessionUseCase: Send + Sync {
    async fn execute(&self) -> Result<SessionStatus, SessionError>;
}

pub struct GetSessionService<O>
where
    O: SessionOracle,
{
    oracle: O,
}

impl<O> GetSessionService<O>
where
    O: SessionOracle,
{
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl<O> GetSessionUseCase for GetSessionService<O>
where
    O: SessionOracle,
{
    async fn execute(&self) -> Result<SessionStatus, SessionError> {
        let status = match self.oracle.current_user().await? {
            Some(user) => SessionStatus {
                authenticated: true,
                capabilities: user.capabilities().to_vec(),
                email: user.email,
            },
            None => SessionStatus::anonymous(),
        };
        Ok(status)
    }
}
