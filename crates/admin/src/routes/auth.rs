//! Authentication route handlers for the dashboard.
//!
//! Password login is delegated to the backend; the returned token and user
//! are kept in the cookie session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use lca_tv_client::ApiError;
use lca_tv_core::validation::{FieldErrors, LoginInput};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user};
use crate::filters;
use crate::middleware::auth::{LOGIN_PATH, session_context};
use crate::middleware::push_flash;
use crate::models::Flash;
use crate::state::AppState;

/// Flash shown on the first page after login.
pub const LOGIN_SUCCESS: &str = "Connexion réussie !";
const INVALID_CREDENTIALS: &str = "Nom d'utilisateur ou mot de passe incorrect";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub errors: FieldErrors,
    pub error: Option<String>,
}

impl LoginTemplate {
    fn empty() -> Self {
        Self {
            username: String::new(),
            errors: FieldErrors::new(),
            error: None,
        }
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Render the login page, or skip it when already signed in.
///
/// GET /login
async fn login_page(session: Session) -> Response {
    let signed_in = match session_context(&session).await {
        Ok(context) => context.user().await.is_some(),
        Err(_) => false,
    };
    if signed_in {
        return Redirect::to("/dashboard").into_response();
    }
    LoginTemplate::empty().into_response()
}

/// Validate the form, log in against the backend, store the session.
///
/// POST /login
#[instrument(skip(state, session, input), fields(username = %input.username))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<LoginInput>,
) -> Result<Response, AppError> {
    let credentials = match input.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            let page = LoginTemplate {
                username: input.username,
                errors,
                error: None,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let api = state.api().with_session(session_context(&session).await?);
    match api.auth().login(&credentials).await {
        Ok(response) => {
            tracing::info!(admin = %response.user.username, "Admin logged in");
            push_flash(&session, Flash::success(LOGIN_SUCCESS)).await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Admin login failed");
            let (status, message) = match &e {
                ApiError::Unauthorized(_) => {
                    (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string())
                }
                ApiError::Api { status, .. } if *status < 500 => {
                    (StatusCode::BAD_REQUEST, e.user_message())
                }
                _ => (StatusCode::BAD_GATEWAY, e.user_message()),
            };
            let page = LoginTemplate {
                username: credentials.username,
                errors: FieldErrors::new(),
                error: Some(message),
            };
            Ok((status, page).into_response())
        }
    }
}

/// Logout and clear session.
///
/// POST /logout
async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect, AppError> {
    let api = state.api().with_session(session_context(&session).await?);
    api.auth().logout().await?;
    session.flush().await?;
    clear_sentry_user();
    Ok(Redirect::to(LOGIN_PATH))
}
