//! Session expiry handling.
//!
//! A handler that hits a backend 401 returns an error response tagged with
//! [`SessionExpired`]. By then the request-scoped session context has already
//! dropped the credential; this middleware flushes the rest of the cookie
//! session and sends the browser to the login page.

use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use super::auth::{is_htmx, login_redirect};
use crate::error::{SessionExpired, clear_sentry_user};

/// Turn a [`SessionExpired`] response into a login redirect.
pub async fn redirect_on_expiry(session: Session, request: Request, next: Next) -> Response {
    let htmx = is_htmx(request.headers());
    let response = next.run(request).await;
    if response.extensions().get::<SessionExpired>().is_none() {
        return response;
    }

    tracing::info!("Admin session expired, redirecting to login");
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to flush expired session");
    }
    clear_sentry_user();
    login_redirect(htmx)
}
