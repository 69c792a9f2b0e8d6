//! Viewer sign-in, registration and sign-out.
//!
//! Nested under `/auth` behind the rate limiter.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use lca_tv_client::ApiError;
use lca_tv_core::validation::{FieldErrors, LoginInput, RegistrationInput};
use tracing::instrument;

use super::Page;
use crate::error::{AppError, clear_sentry_user};
use crate::filters;
use crate::middleware::{Visitor, push_flash};
use crate::models::Flash;
use crate::state::AppState;

const LOGIN: &str = "/auth/login";
const REGISTER: &str = "/auth/register";

pub const LOGIN_SUCCESS: &str = "Connexion réussie !";
const INVALID_CREDENTIALS: &str = "Identifiants invalides";
const REGISTRATION_FAILED: &str = "Erreur lors de la création du compte";

/// Build the auth router (nested under `/auth`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", post(logout))
}

#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: Page,
    pub username: String,
    pub errors: FieldErrors,
    pub error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub page: Page,
    pub input: RegistrationInput,
    pub errors: FieldErrors,
    pub error: Option<String>,
}

/// Message for a rejected login: the backend's detail when it gave one.
fn login_failure(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized(detail) if !detail.trim().is_empty() => detail.clone(),
        ApiError::Unauthorized(_) => INVALID_CREDENTIALS.to_string(),
        ApiError::Api { status, message } if *status < 500 && !message.is_empty() => {
            message.clone()
        }
        other => other.user_message(),
    }
}

/// GET /auth/login
async fn login_page(visitor: Visitor) -> Result<Response, AppError> {
    if visitor.is_signed_in() {
        return Ok(Redirect::to("/profile").into_response());
    }
    Ok(LoginTemplate {
        page: Page::load(&visitor, LOGIN).await?,
        username: String::new(),
        errors: FieldErrors::new(),
        error: None,
    }
    .into_response())
}

/// POST /auth/login
#[instrument(skip(visitor, input), fields(username = %input.username))]
async fn login(visitor: Visitor, Form(input): Form<LoginInput>) -> Result<Response, AppError> {
    let credentials = match input.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            let page = LoginTemplate {
                page: Page::load(&visitor, LOGIN).await?,
                username: input.username,
                errors,
                error: None,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    match visitor.api.auth().viewer_login(&credentials).await {
        Ok(user) => {
            tracing::info!(user = %user.username(), "Viewer logged in");
            push_flash(
                &visitor.session,
                Flash::success(LOGIN_SUCCESS, format!("Bienvenue, {} !", user.display_name())),
            )
            .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Viewer login failed");
            let status = match &e {
                ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                ApiError::Api { status, .. } if *status < 500 => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
                }
                _ => StatusCode::BAD_GATEWAY,
            };
            let page = LoginTemplate {
                page: Page::load(&visitor, LOGIN).await?,
                username: credentials.username,
                errors: FieldErrors::new(),
                error: Some(login_failure(&e)),
            };
            Ok((status, page).into_response())
        }
    }
}

/// GET /auth/register
async fn register_page(visitor: Visitor) -> Result<Response, AppError> {
    if visitor.is_signed_in() {
        return Ok(Redirect::to("/profile").into_response());
    }
    Ok(RegisterTemplate {
        page: Page::load(&visitor, REGISTER).await?,
        input: RegistrationInput::default(),
        errors: FieldErrors::new(),
        error: None,
    }
    .into_response())
}

/// POST /auth/register
///
/// The new account is signed in straight away.
#[instrument(skip(visitor, input), fields(username = %input.username))]
async fn register(
    visitor: Visitor,
    Form(input): Form<RegistrationInput>,
) -> Result<Response, AppError> {
    let registration = match input.validate() {
        Ok(registration) => registration,
        Err(errors) => {
            let page = RegisterTemplate {
                page: Page::load(&visitor, REGISTER).await?,
                error: RegistrationInput::summary(&errors).map(str::to_string),
                input,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    match visitor.api.auth().register(&registration).await {
        Ok(user) => {
            push_flash(
                &visitor.session,
                Flash::success(
                    "Compte créé avec succès !",
                    format!("Bienvenue sur LCA TV, {} !", user.display_name()),
                ),
            )
            .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            let (status, message) = match &e {
                ApiError::Api { status, message } if *status < 500 && !message.is_empty() => (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST),
                    message.clone(),
                ),
                ApiError::Http(_) => (StatusCode::BAD_GATEWAY, e.user_message()),
                _ => (StatusCode::BAD_GATEWAY, REGISTRATION_FAILED.to_string()),
            };
            let page = RegisterTemplate {
                page: Page::load(&visitor, REGISTER).await?,
                input,
                errors: FieldErrors::new(),
                error: Some(message),
            };
            Ok((status, page).into_response())
        }
    }
}

/// POST /auth/logout
///
/// Drops the credential; preferences stay with the browser session.
async fn logout(visitor: Visitor) -> Result<Redirect, AppError> {
    visitor.api.auth().logout().await?;
    clear_sentry_user();
    push_flash(
        &visitor.session,
        Flash::success("Déconnecté", "Vous avez été déconnecté avec succès."),
    )
    .await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failure_prefers_backend_detail() {
        assert_eq!(
            login_failure(&ApiError::Unauthorized("Compte désactivé".to_string())),
            "Compte désactivé"
        );
        assert_eq!(
            login_failure(&ApiError::Unauthorized(String::new())),
            INVALID_CREDENTIALS
        );
    }
}
