//! Persistence backends for the session credential.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use super::SessionUser;

/// Environment variable overriding the CLI session file location.
pub const SESSION_FILE_ENV: &str = "LCA_SESSION_FILE";

/// Errors from a session store.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No configuration directory available; set {SESSION_FILE_ENV}")]
    NoConfigDir,

    /// An external session backend (e.g. an HTTP cookie session) failed.
    #[error("Session backend error: {0}")]
    Backend(String),
}

/// The persisted form of a session: exactly two keys.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub auth_token: String,
    pub user_data: SessionUser,
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSession")
            .field("auth_token", &"[REDACTED]")
            .field("user_data", &self.user_data)
            .finish()
    }
}

/// Where a [`super::SessionContext`] persists its credential.
#[async_trait]
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Read the persisted session, if any.
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError>;

    /// Replace the persisted session.
    async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError>;

    /// Remove the persisted session. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}

// =============================================================================
// MemorySessionStore
// =============================================================================

/// Process-local store, used by tests and per-request contexts.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `session`.
    #[must_use]
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        *self.slot.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot.lock().await = None;
        Ok(())
    }
}

// =============================================================================
// FileSessionStore
// =============================================================================

/// JSON file store used by the CLI.
///
/// The file holds `{"auth_token": ..., "user_data": {...}}`. Writes go to a
/// sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/lca-tv/session.json`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lca-tv").join("session.json"))
    }

    /// Store at `LCA_SESSION_FILE`, or at [`Self::default_path`].
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::NoConfigDir` when neither is available.
    pub fn from_env() -> Result<Self, SessionStoreError> {
        std::env::var(SESSION_FILE_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .or_else(Self::default_path)
            .map(Self::new)
            .ok_or(SessionStoreError::NoConfigDir)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(session)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lca_tv_core::ViewerId;
    use lca_tv_core::models::ViewerUser;

    use super::*;

    fn session() -> StoredSession {
        StoredSession {
            auth_token: "tok-abc".to_string(),
            user_data: SessionUser::Viewer(ViewerUser {
                id: ViewerId::new("v1"),
                username: "fatim".to_string(),
                email: "fatim@gmail.com".to_string(),
                full_name: "Fatimata Ouédraogo".to_string(),
                phone: None,
                profile_image: None,
                created_at: None,
                is_active: true,
            }),
        }
    }

    #[tokio::test]
    async fn test_file_store_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().await.unwrap().is_none());
        store.save(&session()).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["auth_token", "user_data"]);

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.auth_token, "tok-abc");
        assert_eq!(loaded.user_data.username(), "fatim");

        store.clear().await.unwrap();
        assert!(!store.path().exists());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(FileSessionStore::new(path).load().await.unwrap().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", session());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("tok-abc"));
    }
}
