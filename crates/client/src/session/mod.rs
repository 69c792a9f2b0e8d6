//! Explicit session context.
//!
//! The session is the bearer token plus the cached user record. Every read
//! goes through [`SessionContext`]; the only writers are the login flows
//! and the 401 interceptor in [`crate::ApiClient`]. Views that depend on
//! authentication subscribe to [`SessionEvent`]s through
//! [`SessionContext::subscribe`].

mod store;
#[cfg(feature = "tower-sessions")]
mod web;

pub use store::{
    FileSessionStore, MemorySessionStore, SESSION_FILE_ENV, SessionStore, SessionStoreError,
    StoredSession,
};
#[cfg(feature = "tower-sessions")]
pub use web::{AUTH_KEY, TowerSessionStore};

use std::sync::Arc;

use lca_tv_core::models::{AdminUser, ViewerUser};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, de};
use tokio::sync::{RwLock, broadcast};
use tracing::{info, warn};

/// Capacity of the event channel; slow subscribers only miss old events.
const EVENT_CAPACITY: usize = 16;

/// The signed-in user: a dashboard operator or a viewer account.
///
/// Records carrying a `role` are operators; anything else is read as a
/// viewer account, which keeps its phone and avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SessionUser {
    Admin(AdminUser),
    Viewer(ViewerUser),
}

impl<'de> Deserialize<'de> for SessionUser {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("role").is_some_and(|role| !role.is_null()) {
            AdminUser::deserialize(value)
                .map(Self::Admin)
                .map_err(de::Error::custom)
        } else {
            ViewerUser::deserialize(value)
                .map(Self::Viewer)
                .map_err(de::Error::custom)
        }
    }
}

impl SessionUser {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Admin(user) => user.id.as_str(),
            Self::Viewer(user) => user.id.as_str(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Admin(user) => &user.username,
            Self::Viewer(user) => &user.username,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Admin(user) => &user.email,
            Self::Viewer(user) => &user.email,
        }
    }

    /// Full name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Admin(user) => user.display_name(),
            Self::Viewer(user) if user.full_name.trim().is_empty() => &user.username,
            Self::Viewer(user) => &user.full_name,
        }
    }

    /// The user as a dashboard operator; role-less accounts get no role.
    #[must_use]
    pub fn into_operator(self) -> AdminUser {
        match self {
            Self::Admin(user) => user,
            Self::Viewer(user) => AdminUser::from(user),
        }
    }

    #[must_use]
    pub const fn as_admin(&self) -> Option<&AdminUser> {
        match self {
            Self::Admin(user) => Some(user),
            Self::Viewer(_) => None,
        }
    }
}

/// Token and user of an authenticated session.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: SecretString,
    pub user: SessionUser,
}

impl Credentials {
    #[must_use]
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: SecretString::from(token.into()),
            user,
        }
    }

    fn to_stored(&self) -> StoredSession {
        StoredSession {
            auth_token: self.token.expose_secret().to_string(),
            user_data: self.user.clone(),
        }
    }

    fn from_stored(stored: StoredSession) -> Self {
        Self::new(stored.auth_token, stored.user_data)
    }
}

/// Session state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    LoggedOut,
    /// The backend answered 401; the composition root should navigate to
    /// the login screen.
    Expired,
}

/// Shared handle to the session. Cheap to clone.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    state: RwLock<Option<Credentials>>,
    store: Arc<dyn SessionStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionContext {
    /// An empty session persisted to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_state(store, None)
    }

    /// An empty session kept in memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// An in-memory session seeded with existing credentials, e.g. the ones
    /// an HTTP session cookie resolved to.
    #[must_use]
    pub fn from_credentials(credentials: Option<Credentials>) -> Self {
        let store = credentials.as_ref().map_or_else(MemorySessionStore::new, |c| {
            MemorySessionStore::with_session(c.to_stored())
        });
        Self::with_state(Arc::new(store), credentials)
    }

    /// Load whatever `store` has persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn restore(store: Arc<dyn SessionStore>) -> Result<Self, SessionStoreError> {
        let credentials = store.load().await?.map(Credentials::from_stored);
        Ok(Self::with_state(store, credentials))
    }

    fn with_state(store: Arc<dyn SessionStore>, credentials: Option<Credentials>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(credentials),
                store,
                events,
            }),
        }
    }

    /// Store a fresh credential and announce it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written. The in-memory state
    /// is left unchanged in that case.
    pub async fn login(
        &self,
        token: impl Into<String>,
        user: SessionUser,
    ) -> Result<(), SessionStoreError> {
        let credentials = Credentials::new(token, user);
        let mut state = self.inner.state.write().await;
        self.inner.store.save(&credentials.to_stored()).await?;
        info!(user = %credentials.user.username(), "Session started");
        *state = Some(credentials);
        drop(state);
        let _ = self.inner.events.send(SessionEvent::LoggedIn);
        Ok(())
    }

    /// Bearer token, if signed in.
    pub async fn token(&self) -> Option<SecretString> {
        self.inner
            .state
            .read()
            .await
            .as_ref()
            .map(|c| c.token.clone())
    }

    /// Cached user record, if signed in.
    pub async fn user(&self) -> Option<SessionUser> {
        self.inner
            .state
            .read()
            .await
            .as_ref()
            .map(|c| c.user.clone())
    }

    pub async fn credentials(&self) -> Option<Credentials> {
        self.inner.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.state.read().await.is_some()
    }

    /// Sign out locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted copy cannot be removed; the
    /// in-memory credential is dropped regardless.
    pub async fn clear(&self) -> Result<(), SessionStoreError> {
        self.wipe().await?;
        let _ = self.inner.events.send(SessionEvent::LoggedOut);
        Ok(())
    }

    /// Drop the credential after a 401 and publish [`SessionEvent::Expired`].
    ///
    /// Never fails: a store error is logged and the event is still sent.
    pub async fn expire(&self) {
        if let Err(e) = self.wipe().await {
            warn!(error = %e, "Failed to clear persisted session after 401");
        }
        info!("Session expired");
        let _ = self.inner.events.send(SessionEvent::Expired);
    }

    async fn wipe(&self) -> Result<(), SessionStoreError> {
        let mut state = self.inner.state.write().await;
        *state = None;
        self.inner.store.clear().await
    }

    /// The single subscription point for session changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("store", &self.inner.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lca_tv_core::{AdminRole, AdminUserId};

    use super::*;

    fn admin() -> SessionUser {
        SessionUser::Admin(AdminUser {
            id: AdminUserId::new("a1"),
            username: "awa".to_string(),
            email: "awa@lcatv.bf".to_string(),
            full_name: "Awa Ouédraogo".to_string(),
            role: Some(AdminRole::Admin),
            is_active: true,
            created_at: None,
            last_login: None,
        })
    }

    #[tokio::test]
    async fn test_login_persists_and_notifies() {
        let store = Arc::new(MemorySessionStore::new());
        let session = SessionContext::new(store.clone());
        let mut events = session.subscribe();

        session.login("tok-1", admin()).await.unwrap();

        assert_eq!(session.token().await.unwrap().expose_secret(), "tok-1");
        assert_eq!(session.user().await.unwrap().display_name(), "Awa Ouédraogo");
        assert_eq!(store.load().await.unwrap().unwrap().auth_token, "tok-1");
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedIn);
    }

    #[tokio::test]
    async fn test_expire_clears_everything() {
        let store = Arc::new(MemorySessionStore::new());
        let session = SessionContext::new(store.clone());
        session.login("tok-1", admin()).await.unwrap();
        let mut events = session.subscribe();

        session.expire().await;

        assert!(!session.is_authenticated().await);
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
    }

    #[tokio::test]
    async fn test_restore_from_store() {
        let stored = StoredSession {
            auth_token: "tok-2".to_string(),
            user_data: admin(),
        };
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_session(stored));
        let session = SessionContext::restore(store).await.unwrap();
        assert!(session.is_authenticated().await);
        assert!(session.user().await.unwrap().as_admin().is_some());
    }

    #[test]
    fn test_session_user_untagged_round_trip() {
        let json = serde_json::to_string(&admin()).unwrap();
        let back: SessionUser = serde_json::from_str(&json).unwrap();
        assert!(back.as_admin().is_some());

        let viewer: SessionUser = serde_json::from_str(
            r#"{"id":"v1","username":"ali","email":"ali@gmail.com","full_name":""}"#,
        )
        .unwrap();
        assert!(viewer.as_admin().is_none());
        assert_eq!(viewer.display_name(), "ali");
    }

    #[test]
    fn test_role_less_account_becomes_operator() {
        let user: SessionUser = serde_json::from_str(
            r#"{"id":"u9","username":"fati","email":"fati@lcatv.bf","full_name":"Fati Zongo",
                "phone":"+22670112233","profile_image":null,"created_at":"2024-05-01T08:00:00",
                "is_active":true,"preferences":{}}"#,
        )
        .unwrap();
        assert!(matches!(&user, SessionUser::Viewer(v) if v.phone.as_deref() == Some("+22670112233")));

        let operator = user.into_operator();
        assert!(operator.role.is_none());
        assert_eq!(operator.username, "fati");
        assert_eq!(admin().into_operator().role, Some(AdminRole::Admin));
    }
}
