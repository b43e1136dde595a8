use async_trait::async_trait;
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

use crate::auth::application::{
    domain::{entities::SessionUser, policies::admin_policy::AdminPolicy},
    ports::outgoing::{AuthGateway, AuthGatewayError},
};
use crate::shared::notifications::{Notification, Notifier};

// ========================= Admin Login Request =========================
/// Validated admin login request - can be deserialized directly from JSON
#[derive(Debug, Clone)]
pub struct AdminLoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AdminLoginRequestError {
    #[error("Email cannot be empty")]
    EmptyEmail,
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl AdminLoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, AdminLoginRequestError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AdminLoginRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(AdminLoginRequestError::InvalidEmailFormat);
        }
        // Passwords are sent as typed; only reject an empty one.
        if password.is_empty() {
            return Err(AdminLoginRequestError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password,
        })
    }

    /// Lowercased and trimmed.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl<'de> Deserialize<'de> for AdminLoginRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            email: String,
            password: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        AdminLoginRequest::new(helper.email, helper.password).map_err(serde::de::Error::custom)
    }
}

// ====================== Admin Login Error =============================
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LoginAdminError {
    #[error("Invalid admin email.")]
    InvalidAdminEmail,

    #[error("Incorrect admin password.")]
    IncorrectPassword,

    #[error("Admin authentication failed.")]
    NotAdmin,

    #[error("{0}")]
    Rejected(String),

    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

// ============================ Use Case =============================
#[async_trait]
pub trait LoginAdminUseCase: Send + Sync {
    async fn execute(&self, request: AdminLoginRequest) -> Result<SessionUser, LoginAdminError>;
}

pub struct LoginAdminService<G>
where
    G: AuthGateway,
{
    gateway: G,
    policy: AdminPolicy,
    notifier: Arc<dyn Notifier>,
}

impl<G> LoginAdminService<G>
where
    G: AuthGateway,
{
    pub fn new(gateway: G, policy: AdminPolicy, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            policy,
            notifier,
        }
    }

    async fn sign_in(&self, request: &AdminLoginRequest) -> Result<SessionUser, LoginAdminError> {
        // 1) Only the configured admin account may even try.
        if !self.policy.is_admin_email(request.email()) {
            return Err(LoginAdminError::InvalidAdminEmail);
        }

        // 2) Sign in as the configured admin, with the password as entered.
        let user = self
            .gateway
            .sign_in_with_password(self.policy.admin_email(), request.password())
            .await
            .map_err(|err| match err {
                AuthGatewayError::InvalidCredentials => LoginAdminError::IncorrectPassword,
                AuthGatewayError::Rejected(msg) => LoginAdminError::Rejected(msg),
                AuthGatewayError::Unavailable(msg) => LoginAdminError::Unavailable(msg),
            })?;

        // 3) The service must agree on who signed in; otherwise drop the session again.
        if !user.has_email(self.policy.admin_email()) {
            if let Err(err) = self.gateway.sign_out().await {
                tracing::warn!(error = %err, "Sign-out after admin mismatch failed");
            }
            return Err(LoginAdminError::NotAdmin);
        }

        Ok(user)
    }
}

#[async_trait]
impl<G> LoginAdminUseCase for LoginAdminService<G>
where
    G: AuthGateway,
{
    async fn execute(&self, request: AdminLoginRequest) -> Result<SessionUser, LoginAdminError> {
        match self.sign_in(&request).await {
            Ok(user) => {
                self.notifier
                    .notify(Notification::success("Successfully logged in as admin"));
                Ok(user)
            }
            Err(err) => {
                self.notifier.notify(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }
}
