//! Unified error handling for the viewer app.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lca_tv_client::{ApiError, SessionStoreError};
use thiserror::Error;

/// Application-level error type for the viewer app.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend call failed.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Cookie session could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SessionStoreError> for AppError {
    fn from(e: SessionStoreError) -> Self {
        Self::Api(ApiError::Session(e))
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Api(ApiError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            Self::Api(ApiError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Api(ApiError::Api { status, .. }) if (400..500).contains(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            Self::Api(_) => StatusCode::BAD_GATEWAY,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Viewer request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Api(e) => e.user_message(),
            Self::Session(_) | Self::Internal(_) => "Erreur interne du serveur".to_string(),
            Self::NotFound(_) => "Page introuvable".to_string(),
        };

        (status, message).into_response()
    }
}

/// Set the Sentry user context from the signed-in viewer.
pub fn set_sentry_user(user_id: &str, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
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
    fn test_status_mapping_hides_internals() {
        let response = AppError::Internal("template blew up".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::Api(ApiError::Api {
            status: 502,
            message: "YouTube quota".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::NotFound("video".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
