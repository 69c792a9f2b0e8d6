//! Unified error handling for the dashboard.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lca_tv_client::{ApiError, SessionStoreError};
use thiserror::Error;

/// Response extension marking a backend 401.
///
/// Set by [`AppError::into_response`]; the session-expiry middleware turns
/// any response carrying it into a flushed session and a login redirect.
#[derive(Debug, Clone, Copy)]
pub struct SessionExpired;

/// Application-level error type for the dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend call failed.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Cookie session could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SessionStoreError> for AppError {
    fn from(e: SessionStoreError) -> Self {
        Self::Api(ApiError::Session(e))
    }
}

impl AppError {
    /// True when the backend rejected the session's token.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized(_)))
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Api(ApiError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            Self::Api(ApiError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Api(ApiError::Api { status, .. }) if (400..500).contains(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            Self::Api(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Dashboard request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Api(e) => e.user_message(),
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let mut response = (status, message).into_response();
        if self.is_session_expired() {
            response.extensions_mut().insert(SessionExpired);
        }
        response
    }
}

/// Set the Sentry user context from the signed-in admin.
pub fn set_sentry_user(admin_user_id: &str, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_user_id.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("order-123".to_string());
        assert_eq!(err.to_string(), "Not found: order-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Api(ApiError::Unauthorized("expired".to_string()))),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Api(ApiError::Api {
                status: 409,
                message: "exists".to_string()
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Api(ApiError::Api {
                status: 503,
                message: "down".to_string()
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_only_unauthorized_marks_session_expired() {
        let expired = AppError::Api(ApiError::Unauthorized("expired".to_string())).into_response();
        assert!(expired.extensions().get::<SessionExpired>().is_some());

        let missing = AppError::NotFound("client".to_string()).into_response();
        assert!(missing.extensions().get::<SessionExpired>().is_none());
    }
}
