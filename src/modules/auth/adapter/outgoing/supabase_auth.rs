use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::application::{
    domain::entities::{AuthSession, SessionUser},
    ports::outgoing::{AuthGateway, AuthGatewayError, SessionError, SessionOracle},
};
use crate::shared::supabase::{send_json, send_unit, ApiFailure, SessionStore, SupabaseConfig};

#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: SessionUser,
}

impl TokenResponse {
    fn into_session(self) -> AuthSession {
        AuthSession::new(
            self.access_token,
            self.refresh_token,
            self.expires_in,
            self.user,
            Utc::now(),
        )
    }
}

fn is_outage(failure: &ApiFailure) -> bool {
    !matches!(failure.status, Some(s) if s < 500)
}

/// GoTrue answers 401/403 for tokens it no longer accepts and 404 for users
/// that were deleted in the meantime.
fn is_session_rejected(failure: &ApiFailure) -> bool {
    matches!(failure.status, Some(401 | 403 | 404))
}

fn map_sign_in_error(failure: ApiFailure) -> AuthGatewayError {
    if failure
        .message
        .to_lowercase()
        .contains("invalid login credentials")
    {
        AuthGatewayError::InvalidCredentials
    } else if is_outage(&failure) {
        AuthGatewayError::Unavailable(failure.to_string())
    } else {
        AuthGatewayError::Rejected(failure.message)
    }
}

/// Internal seam so the adapter can be tested without a live GoTrue server.
#[async_trait]
trait AuthApi: Send + Sync {
    async fn password_grant(&self, email: &str, password: &str)
        -> Result<TokenResponse, ApiFailure>;

    async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenResponse, ApiFailure>;

    async fn get_user(&self, access_token: &str) -> Result<SessionUser, ApiFailure>;

    async fn logout(&self, access_token: &str) -> Result<(), ApiFailure>;
}

/// Supabase Auth (GoTrue) adapter: signs the admin in and out and answers
/// whether a session is currently active.
#[derive(Clone)]
pub struct SupabaseAuth {
    api: Arc<dyn AuthApi>,
    sessions: SessionStore,
}

impl SupabaseAuth {
    pub fn new(http: reqwest::Client, config: SupabaseConfig, sessions: SessionStore) -> Self {
        Self {
            api: Arc::new(GoTrueApi { http, config }),
            sessions,
        }
    }

    #[cfg(test)]
    fn with_api(api: Arc<dyn AuthApi>, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    /// Returns a session whose access token is still valid, refreshing it if needed.
    async fn live_session(&self) -> Result<Option<AuthSession>, SessionError> {
        let Some(session) = self.sessions.get().await else {
            return Ok(None);
        };
        if !session.is_expired(Utc::now()) {
            return Ok(Some(session));
        }

        match self.api.refresh_grant(&session.refresh_token).await {
            Ok(tokens) => {
                let refreshed = tokens.into_session();
                self.sessions.set(refreshed.clone()).await;
                tracing::debug!("Access token refreshed");
                Ok(Some(refreshed))
            }
            Err(failure) if is_outage(&failure) => {
                Err(SessionError::Unavailable(failure.to_string()))
            }
            Err(failure) => {
                tracing::warn!(error = %failure, "Token refresh rejected; dropping session");
                self.sessions.clear().await;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl SessionOracle for SupabaseAuth {
    async fn current_user(&self) -> Result<Option<SessionUser>, SessionError> {
        let Some(session) = self.live_session().await? else {
            return Ok(None);
        };

        match self.api.get_user(&session.access_token).await {
            Ok(user) => Ok(Some(user)),
            Err(failure) if is_session_rejected(&failure) => {
                tracing::warn!(error = %failure, "Session no longer accepted; dropping it");
                self.sessions.clear().await;
                Ok(None)
            }
            Err(failure) => Err(SessionError::Unavailable(failure.to_string())),
        }
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuth {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthGatewayError> {
        let tokens = self
            .api
            .password_grant(email, password)
            .await
            .map_err(map_sign_in_error)?;

        let session = tokens.into_session();
        let user = session.user.clone();
        self.sessions.set(session).await;

        tracing::info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthGatewayError> {
        let Some(token) = self.sessions.access_token().await else {
            return Ok(());
        };

        match self.api.logout(&token).await {
            Ok(()) => {}
            // Already gone server-side; forgetting it locally is all that is left.
            Err(failure) if is_session_rejected(&failure) => {}
            Err(failure) if is_outage(&failure) => {
                return Err(AuthGatewayError::Unavailable(failure.to_string()));
            }
            Err(failure) => return Err(AuthGatewayError::Rejected(failure.message)),
        }

        self.sessions.clear().await;
        tracing::info!("Signed out");
        Ok(())
    }
}

// ============================================================================
// Real GoTrue client (reqwest)
// ============================================================================

struct GoTrueApi {
    http: reqwest::Client,
    config: SupabaseConfig,
}

impl GoTrueApi {
    fn token_url(&self, grant_type: &str) -> reqwest::Url {
        let mut url = self.config.endpoint(&["auth", "v1", "token"]);
        url.query_pairs_mut().append_pair("grant_type", grant_type);
        url
    }
}

#[async_trait]
impl AuthApi for GoTrueApi {
    async fn password_grant(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiFailure> {
        let request = self
            .http
            .post(self.token_url("password"))
            .header("apikey", self.config.anon_key())
            .bearer_auth(self.config.anon_key())
            .json(&serde_json::json!({ "email": email, "password": password }));

        send_json(request).await
    }

    async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenResponse, ApiFailure> {
        let request = self
            .http
            .post(self.token_url("refresh_token"))
            .header("apikey", self.config.anon_key())
            .bearer_auth(self.config.anon_key())
            .json(&serde_json::json!({ "refresh_token": refresh_token }));

        send_json(request).await
    }

    async fn get_user(&self, access_token: &str) -> Result<SessionUser, ApiFailure> {
        let request = self
            .http
            .get(self.config.endpoint(&["auth", "v1", "user"]))
            .header("apikey", self.config.anon_key())
            .bearer_auth(access_token);

        send_json(request).await
    }

    async fn logout(&self, access_token: &str) -> Result<(), ApiFailure> {
        let request = self
            .http
            .post(self.config.endpoint(&["auth", "v1", "logout"]))
            .header("apikey", self.config.anon_key())
            .bearer_auth(access_token);

        send_unit(request).await
    }
}

// ============================================================================
// Tests
// ============================================================================
