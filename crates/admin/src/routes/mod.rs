//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Auth
//! GET  /login                           - Login page
//! POST /login                           - Password login against the backend
//! POST /logout                          - Logout
//!
//! # Dashboard
//! GET  /                                - Redirect to /dashboard
//! GET  /dashboard                       - Stat cards, revenue chart, ticker
//! GET  /dashboard/stats                 - Stat cards fragment (polled every 30s)
//! GET  /dashboard/ticker                - Ticker fragment
//!
//! # Clients
//! GET  /dashboard/clients               - Client list
//! POST /dashboard/clients               - Create client
//! GET  /dashboard/clients/new           - Creation form
//! GET  /dashboard/clients/{id}          - Client detail + edit form
//! POST /dashboard/clients/{id}          - Update client
//! POST /dashboard/clients/{id}/delete   - Delete client
//!
//! # Ad spaces
//! GET  /dashboard/ad-spaces             - Ad space list + creation form
//! POST /dashboard/ad-spaces             - Create ad space
//! POST /dashboard/ad-spaces/{id}        - Update ad space
//! POST /dashboard/ad-spaces/{id}/delete - Delete ad space
//!
//! # Orders
//! GET  /dashboard/orders                - Order list (?status=)
//! GET  /dashboard/orders/new            - Creation form
//! POST /dashboard/orders                - Create order
//! GET  /dashboard/orders/estimate       - Price estimate fragment
//! POST /dashboard/orders/{id}/status    - Update order/payment status
//! POST /dashboard/orders/{id}/delete    - Delete order
//!
//! # Analytics, users, settings
//! GET  /dashboard/analytics             - Revenue + performance
//! GET  /dashboard/users                 - Admin user list + creation form
//! POST /dashboard/users                 - Create admin user
//! POST /dashboard/users/{id}/active     - Toggle account activation
//! POST /dashboard/users/{id}/delete     - Delete admin user
//! GET  /dashboard/settings              - Session and profile info
//! ```

pub mod ad_spaces;
pub mod analytics;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod orders;
pub mod settings;
pub mod users;

use axum::{Router, response::Redirect, routing::get};
use lca_tv_client::ApiError;
use lca_tv_core::format::initials;
use lca_tv_core::models::AdminUser;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{CurrentAdmin, push_flash, take_flash};
use crate::models::Flash;
use crate::state::AppState;

/// Build the full route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .merge(auth::router())
        .merge(dashboard::router())
        .nest("/dashboard/clients", clients::router())
        .nest("/dashboard/ad-spaces", ad_spaces::router())
        .nest("/dashboard/orders", orders::router())
        .nest("/dashboard/users", users::router())
        .route("/dashboard/analytics", get(analytics::index))
        .route("/dashboard/settings", get(settings::index))
}

// =============================================================================
// Shared page context
// =============================================================================

/// Signed-in admin as shown in the sidebar.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
    pub initials: String,
    pub role: &'static str,
}

impl From<&AdminUser> for AdminUserView {
    fn from(user: &AdminUser) -> Self {
        Self {
            name: user.display_name().to_string(),
            email: user.email.clone(),
            initials: initials(user.display_name()),
            role: user.role_label(),
        }
    }
}

/// Everything the base layout needs.
#[derive(Debug, Clone)]
pub struct Page {
    pub admin: AdminUserView,
    pub current_path: &'static str,
    /// Banners in display order.
    pub flashes: Vec<Flash>,
}

impl Page {
    /// Layout context for `path`, consuming the pending flash.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn load(admin: &CurrentAdmin, current_path: &'static str) -> Result<Self, AppError> {
        Ok(Self {
            admin: AdminUserView::from(&admin.user),
            current_path,
            flashes: take_flash(&admin.session).await?.into_iter().collect(),
        })
    }

    /// Show a load failure as an error banner (after any pending flash).
    #[must_use]
    pub fn with_error(mut self, error: Option<String>) -> Self {
        if let Some(message) = error {
            self.flashes.push(Flash::error(message));
        }
        self
    }

    /// Whether `prefix` is the active sidebar section.
    #[must_use]
    pub fn is_active(&self, prefix: &str) -> bool {
        if prefix == "/dashboard" {
            self.current_path == prefix
        } else {
            self.current_path.starts_with(prefix)
        }
    }
}

/// Split a read into data and a user-facing message.
///
/// Backend 401s keep propagating so the expiry middleware can redirect;
/// anything else degrades to an empty value plus a banner.
///
/// # Errors
///
/// Returns the error when it is a 401.
pub fn loaded<T: Default>(result: Result<T, ApiError>) -> Result<(T, Option<String>), AppError> {
    match result {
        Ok(value) => Ok((value, None)),
        Err(e) if e.is_unauthorized() => Err(e.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Backend read failed");
            Ok((T::default(), Some(e.user_message())))
        }
    }
}

/// User-facing message for a rejected form submission.
///
/// # Errors
///
/// Returns the error when it is a 401.
pub fn rejection_message(error: ApiError) -> Result<String, AppError> {
    if error.is_unauthorized() {
        return Err(error.into());
    }
    tracing::warn!(error = %error, "Backend rejected submission");
    Ok(error.user_message())
}

/// Flash the outcome of a mutation; a 401 keeps propagating.
///
/// # Errors
///
/// Returns the error when it is a 401, or if the session cannot be written.
pub async fn flash_outcome<T>(
    session: &Session,
    result: Result<T, ApiError>,
    success: &str,
) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => {
            push_flash(session, Flash::success(success)).await?;
            Ok(Some(value))
        }
        Err(e) if e.is_unauthorized() => Err(e.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Backend mutation failed");
            push_flash(session, Flash::error(e.user_message())).await?;
            Ok(None)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_degrades_transient_failures() {
        let (value, error) = loaded::<Vec<u32>>(Err(ApiError::Api {
            status: 503,
            message: "down".to_string(),
        }))
        .unwrap();
        assert!(value.is_empty());
        assert!(error.is_some());

        let expired = loaded::<Vec<u32>>(Err(ApiError::Unauthorized("expired".to_string())));
        assert!(matches!(expired, Err(e) if e.is_session_expired()));
    }

    #[test]
    fn test_load_error_follows_pending_flash() {
        let page = Page {
            admin: AdminUserView {
                name: "Awa Ouédraogo".to_string(),
                email: "awa@lcatv.bf".to_string(),
                initials: "AO".to_string(),
                role: "Administrateur",
            },
            current_path: "/dashboard",
            flashes: vec![Flash::success("Connexion réussie !")],
        };

        let page = page
            .with_error(Some("Revenus indisponibles".to_string()))
            .with_error(None);

        assert_eq!(
            page.flashes,
            [
                Flash::success("Connexion réussie !"),
                Flash::error("Revenus indisponibles"),
            ]
        );
    }
}
