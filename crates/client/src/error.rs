//! Errors returned by backend calls.

use thiserror::Error;

use crate::session::SessionStoreError;

/// Errors that can occur when calling the LCA TV backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the credentials. The session has already been
    /// cleared when this is returned.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The persisted session could not be written or cleared.
    #[error("Session storage error: {0}")]
    Session(#[from] SessionStoreError),
}

impl ApiError {
    /// HTTP status of the failed response, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::Api { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) | Self::Session(_) => None,
        }
    }

    /// True for HTTP 401, which must never be retried.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// True for failures worth retrying: transport errors and 5xx/429.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Short French message suitable for a toast or flash banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) => "Impossible de joindre le serveur. Vérifiez votre connexion.".to_string(),
            Self::Unauthorized(_) => "Session expirée. Veuillez vous reconnecter.".to_string(),
            Self::NotFound(_) => "Ressource introuvable.".to_string(),
            Self::Api { status, message } if *status < 500 && !message.is_empty() => {
                message.clone()
            }
            Self::Api { .. } | Self::Parse(_) | Self::Session(_) => {
                "Une erreur est survenue. Veuillez réessayer.".to_string()
            }
        }
    }
}

/// Result type for backend calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Extract the backend's error message from a response body.
///
/// The backend reports errors as `{"detail": "..."}`; validation errors
/// carry a list of objects with a `msg` field. Anything else is returned
/// as the raw body.
#[must_use]
pub fn extract_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail":"Incorrect username or password"}"#),
            "Incorrect username or password"
        );
        assert_eq!(
            extract_detail(r#"{"detail":[{"loc":["body","email"],"msg":"invalid email"}]}"#),
            "invalid email"
        );
        assert_eq!(extract_detail("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_status_and_classification() {
        let unauthorized = ApiError::Unauthorized("expired".to_string());
        assert_eq!(unauthorized.status(), Some(401));
        assert!(unauthorized.is_unauthorized());
        assert!(!unauthorized.is_transient());

        let server = ApiError::Api {
            status: 503,
            message: "down".to_string(),
        };
        assert!(server.is_transient());
        assert_eq!(server.user_message(), "Une erreur est survenue. Veuillez réessayer.");

        let conflict = ApiError::Api {
            status: 400,
            message: "Client already exists".to_string(),
        };
        assert!(!conflict.is_transient());
        assert_eq!(conflict.user_message(), "Client already exists");
    }
}
