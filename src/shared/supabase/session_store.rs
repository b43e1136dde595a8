use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::application::domain::entities::AuthSession;

/// The one active session of this process, shared between the auth adapter
/// (which writes it) and the storage adapter (which authorizes with it).
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionStore {
    pub async fn get(&self) -> Option<AuthSession> {
        self.inner.read().await.clone()
    }

    pub async fn set(&self, session: AuthSession) {
        *self.inner.write().await = Some(session);
    }

    pub async fn clear(&self) -> Option<AuthSession> {
        self.inner.write().await.take()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }
}
