//! Session middleware configuration for the dashboard.
//!
//! Sessions live in process memory with strict cookie settings
//! (SameSite=Strict, 24hr inactivity expiry). The backend token is kept in
//! the session through [`lca_tv_client::TowerSessionStore`].

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::AdminConfig;
use crate::models::{Flash, session_keys};

/// Session cookie name for the dashboard.
pub const SESSION_COOKIE_NAME: &str = "lca_admin_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Queue a banner for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_flash(session: &Session, flash: Flash) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, flash).await
}

/// Take the pending banner, if any.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>, tower_sessions::session::Error> {
    session.remove(session_keys::FLASH).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_flash_is_shown_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        push_flash(&session, Flash::success("Connexion réussie !"))
            .await
            .unwrap();

        let flash = take_flash(&session).await.unwrap().unwrap();
        assert_eq!(flash.message, "Connexion réussie !");
        assert!(take_flash(&session).await.unwrap().is_none());
    }
}
