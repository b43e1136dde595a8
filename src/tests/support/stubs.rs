//! Use-case stubs for route tests that do not care about a given endpoint.

use async_trait::async_trait;

use crate::auth::application::domain::entities::SessionUser;
use crate::auth::application::ports::outgoing::SessionError;
use crate::auth::application::use_cases::{
    get_session::{GetSessionUseCase, SessionStatus},
    login_admin::{AdminLoginRequest, LoginAdminError, LoginAdminUseCase},
    logout_admin::{LogoutAdminError, LogoutAdminUseCase},
};

pub struct StubLoginAdminUseCase;

#[async_trait]
impl LoginAdminUseCase for StubLoginAdminUseCase {
    async fn execute(&self, _request: AdminLoginRequest) -> Result<SessionUser, LoginAdminError> {
        Err(LoginAdminError::Unavailable("not used in this test".into()))
    }
}

pub struct StubLogoutAdminUseCase;

#[async_trait]
impl LogoutAdminUseCase for StubLogoutAdminUseCase {
    async fn execute(&self) -> Result<(), LogoutAdminError> {
        Ok(())
    }
}

pub struct StubGetSessionUseCase;

#[async_trait]
impl GetSessionUseCase for StubGetSessionUseCase {
    async fn execute(&self) -> Result<SessionStatus, SessionError> {
        Ok(SessionStatus::anonymous())
    }
}
