//! Authentication extractors for the dashboard.
//!
//! The signed-in admin is whatever credential the cookie session holds. Each
//! request restores a [`SessionContext`] over that cookie session and binds
//! it to a request-scoped [`ApiClient`], so a backend 401 clears the
//! browser's credential as well.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use lca_tv_client::{ApiClient, SessionContext, TowerSessionStore};
use lca_tv_core::models::AdminUser;
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::state::AppState;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// The signed-in admin for this request.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub user: AdminUser,
    /// Backend client carrying this admin's token.
    pub api: ApiClient,
    pub session: Session,
}

/// Extractor that requires admin authentication.
///
/// Any stored credential grants access; the backend answers 401 once it
/// lapses. Redirects to the login page when nothing is stored; htmx
/// requests get an `HX-Redirect` instead so the whole page navigates.
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but missing.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page.
    RedirectToLogin { htmx: bool },
    /// No session layer is installed.
    Unauthorized,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { htmx } => login_redirect(htmx),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminAuthRejection::Unauthorized)?;
        let htmx = is_htmx(&parts.headers);

        let context = session_context(&session).await.map_err(|e| {
            tracing::warn!(error = %e, "Unreadable admin session");
            AdminAuthRejection::RedirectToLogin { htmx }
        })?;

        let Some(user) = context.user().await else {
            return Err(AdminAuthRejection::RedirectToLogin { htmx });
        };
        let user = user.into_operator();

        set_sentry_user(user.id.as_str(), &user.email);
        Ok(Self(CurrentAdmin {
            user,
            api: state.api().with_session(context),
            session,
        }))
    }
}

/// Restore the backend session held in a cookie session.
///
/// # Errors
///
/// Returns an error if the cookie session cannot be read.
pub async fn session_context(
    session: &Session,
) -> Result<SessionContext, lca_tv_client::SessionStoreError> {
    SessionContext::restore(Arc::new(TowerSessionStore::new(session.clone()))).await
}

/// Whether the request was issued by htmx.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("HX-Request")
}

/// Send the browser to the login page.
#[must_use]
pub fn login_redirect(htmx: bool) -> Response {
    if htmx {
        (StatusCode::OK, [("HX-Redirect", LOGIN_PATH)]).into_response()
    } else {
        Redirect::to(LOGIN_PATH).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, header};

    use super::*;

    #[test]
    fn test_login_redirect_plain_and_htmx() {
        let plain = login_redirect(false);
        assert_eq!(plain.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            plain.headers().get(header::LOCATION),
            Some(&HeaderValue::from_static("/login"))
        );

        let htmx = login_redirect(true);
        assert_eq!(htmx.status(), StatusCode::OK);
        assert_eq!(
            htmx.headers().get("HX-Redirect"),
            Some(&HeaderValue::from_static("/login"))
        );
    }

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("HX-Request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }
}
