//! Authentication and user DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::types::{AdminRole, AdminUserId, ViewerId};

const fn default_true() -> bool {
    true
}

/// Label for operators whose account carries no role.
pub const OPERATOR_LABEL: &str = "Opérateur";

/// A dashboard operator.
///
/// `role` is only sent by backends with role management; a plain `/auth/me`
/// user has none and is still an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<AdminRole>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "timestamp::option", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl AdminUser {
    /// Name to greet the user with, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    /// French role label, [`OPERATOR_LABEL`] when the account has no role.
    #[must_use]
    pub fn role_label(&self) -> &'static str {
        self.role.as_ref().map_or(OPERATOR_LABEL, AdminRole::label)
    }
}

impl From<ViewerUser> for AdminUser {
    fn from(user: ViewerUser) -> Self {
        Self {
            id: AdminUserId::new(user.id.as_str()),
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: None,
            is_active: user.is_active,
            created_at: user.created_at,
            last_login: None,
        }
    }
}

/// Payload for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Response of the dashboard login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: AdminUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Token-only response used by the viewer login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

/// Payload for `POST /admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdminUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: AdminRole,
}

/// Partial update for `PUT /admin/users/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AdminRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A viewer account as returned by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerUser {
    pub id: ViewerId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(with = "timestamp::option", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_from_backend_json() {
        let json = r#"{
            "access_token": "tok-123",
            "token_type": "bearer",
            "user": {
                "id": "65a1",
                "username": "awa",
                "email": "awa@lcatv.bf",
                "full_name": "Awa Ouédraogo",
                "role": "admin",
                "is_active": true,
                "created_at": "2024-01-10T09:30:00",
                "last_login": null
            }
        }"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.access_token, "tok-123");
        assert_eq!(auth.user.role, Some(AdminRole::Admin));
        assert_eq!(auth.user.role_label(), "Administrateur");
        assert_eq!(auth.user.display_name(), "Awa Ouédraogo");
        assert!(auth.user.last_login.is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = AdminUser {
            id: AdminUserId::new("1"),
            username: "editeur1".to_string(),
            email: "e@lcatv.bf".to_string(),
            full_name: "  ".to_string(),
            role: Some(AdminRole::Editor),
            is_active: true,
            created_at: None,
            last_login: None,
        };
        assert_eq!(user.display_name(), "editeur1");
    }

    #[test]
    fn test_user_without_role_is_an_operator() {
        let json = r#"{
            "id": "65b2",
            "username": "moussa",
            "email": "moussa@lcatv.bf",
            "full_name": "Moussa Kaboré",
            "phone": null,
            "profile_image": null,
            "created_at": "2024-03-02T10:00:00",
            "is_active": true,
            "preferences": {}
        }"#;
        let user: AdminUser = serde_json::from_str(json).unwrap();
        assert!(user.role.is_none());
        assert_eq!(user.role_label(), OPERATOR_LABEL);
        assert!(!serde_json::to_string(&user).unwrap().contains("role"));

        let viewer: ViewerUser = serde_json::from_str(json).unwrap();
        let operator = AdminUser::from(viewer);
        assert_eq!(operator.id.as_str(), "65b2");
        assert_eq!(operator.display_name(), "Moussa Kaboré");
        assert!(operator.created_at.is_some());
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = AdminUserUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"is_active":false}"#
        );
    }
}
