//! Optional viewer sign-in.
//!
//! Every screen is public. The extractor restores whatever credential the
//! cookie session holds and binds it to a request-scoped [`ApiClient`], so
//! calls that need a viewer token (advertising requests) carry it and a
//! backend 401 clears it from the browser session.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use lca_tv_client::{ApiClient, SessionContext, SessionStoreError, SessionUser, TowerSessionStore};
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::state::AppState;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/auth/login";

/// The visitor, signed in or not.
#[derive(Debug, Clone)]
pub struct Visitor {
    pub user: Option<SessionUser>,
    /// Backend client carrying the visitor's token, if any.
    pub api: ApiClient,
    pub session: Session,
}

impl Visitor {
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

impl FromRequestParts<AppState> for Visitor {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        let context = match session_context(&session).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable viewer session");
                SessionContext::in_memory()
            }
        };
        let user = context.user().await;
        if let Some(user) = &user {
            set_sentry_user(user.id(), user.email());
        }

        Ok(Self {
            user,
            api: state.api().with_session(context),
            session,
        })
    }
}

/// Restore the backend session held in a cookie session.
///
/// # Errors
///
/// Returns an error if the cookie session cannot be read.
pub async fn session_context(session: &Session) -> Result<SessionContext, SessionStoreError> {
    SessionContext::restore(Arc::new(TowerSessionStore::new(session.clone()))).await
}
