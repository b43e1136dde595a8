use std::sync::Arc;

use crate::auth::application::use_cases::{
    get_session::GetSessionUseCase, login_admin::LoginAdminUseCase,
    logout_admin::LogoutAdminUseCase,
};

#[derive(Clone)]
pub struct AdminUseCases {
    pub login: Arc<dyn LoginAdminUseCase + Send + Sync>,
    pub logout: Arc<dyn LogoutAdminUseCase + Send + Sync>,
    pub session: Arc<dyn GetSessionUseCase + Send + Sync>,
}
