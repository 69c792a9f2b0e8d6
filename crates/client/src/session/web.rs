//! Session persistence inside a `tower-sessions` cookie session.
//!
//! The web apps restore a [`super::SessionContext`] from the browser's
//! session on every request. Because the context writes back through this
//! store, the 401 interceptor's `expire()` removes the credential from the
//! browser session too.

use async_trait::async_trait;
use tower_sessions::Session;

use super::{SessionStore, SessionStoreError, StoredSession};

/// Key under which the credential is kept in the HTTP session.
pub const AUTH_KEY: &str = "auth";

/// [`SessionStore`] backed by a per-request `tower_sessions::Session`.
#[derive(Debug, Clone)]
pub struct TowerSessionStore {
    session: Session,
}

impl TowerSessionStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

fn backend(e: &tower_sessions::session::Error) -> SessionStoreError {
    SessionStoreError::Backend(e.to_string())
}

#[async_trait]
impl SessionStore for TowerSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        self.session
            .get::<StoredSession>(AUTH_KEY)
            .await
            .map_err(|e| backend(&e))
    }

    async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        // New credential, new session id.
        self.session.cycle_id().await.map_err(|e| backend(&e))?;
        self.session
            .insert(AUTH_KEY, session)
            .await
            .map_err(|e| backend(&e))
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        self.session
            .remove::<StoredSession>(AUTH_KEY)
            .await
            .map(|_| ())
            .map_err(|e| backend(&e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use lca_tv_core::ViewerId;
    use lca_tv_core::models::ViewerUser;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::session::{SessionContext, SessionUser};

    fn viewer() -> SessionUser {
        SessionUser::Viewer(ViewerUser {
            id: ViewerId::new("v7"),
            username: "issa".to_string(),
            email: "issa@yahoo.fr".to_string(),
            full_name: "Issa Sawadogo".to_string(),
            phone: None,
            profile_image: None,
            created_at: None,
            is_active: true,
        })
    }

    #[tokio::test]
    async fn test_expire_clears_http_session() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let store = Arc::new(TowerSessionStore::new(session.clone()));

        let context = SessionContext::new(store.clone());
        context.login("tok-9", viewer()).await.unwrap();
        assert!(store.load().await.unwrap().is_some());

        let restored = SessionContext::restore(store.clone()).await.unwrap();
        assert_eq!(restored.user().await.unwrap().username(), "issa");

        restored.expire().await;
        assert!(session.get::<StoredSession>(AUTH_KEY).await.unwrap().is_none());
    }
}
