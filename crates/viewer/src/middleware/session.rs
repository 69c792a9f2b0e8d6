//! Session middleware configuration for the viewer app.
//!
//! Sessions live in process memory (SameSite=Lax so links from other sites
//! keep the visitor signed in, 30 day inactivity expiry). They hold the
//! optional viewer credential, the pending flash and the app preferences.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::ViewerConfig;
use crate::models::{Flash, Preferences, session_keys};

/// Session cookie name for the viewer app.
pub const SESSION_COOKIE_NAME: &str = "lca_viewer_session";

/// Session expiry time in seconds (30 days).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &ViewerConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Queue a banner for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_flash(
    session: &Session,
    flash: Flash,
) -> Result<(), tower_sessions::session::Error> {
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

/// Stored preferences, or the defaults.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_preferences(
    session: &Session,
) -> Result<Preferences, tower_sessions::session::Error> {
    Ok(session
        .get::<Preferences>(session_keys::PREFERENCES)
        .await?
        .unwrap_or_default())
}

/// Replace the stored preferences.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_preferences(
    session: &Session,
    preferences: Preferences,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::PREFERENCES, preferences).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_preferences_default_until_saved() {
        let session = session();
        assert_eq!(load_preferences(&session).await.unwrap(), Preferences::default());

        let dark = Preferences {
            dark_mode: true,
            autoplay: false,
            ..Preferences::default()
        };
        save_preferences(&session, dark).await.unwrap();
        assert_eq!(load_preferences(&session).await.unwrap(), dark);
    }

    #[tokio::test]
    async fn test_flash_is_shown_once() {
        let session = session();
        push_flash(&session, Flash::success("Message envoyé !", "Merci"))
            .await
            .unwrap();
        assert!(take_flash(&session).await.unwrap().is_some());
        assert!(take_flash(&session).await.unwrap().is_none());
    }
}
