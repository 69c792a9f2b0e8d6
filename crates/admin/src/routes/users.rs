//! Admin account management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::Utc;
use lca_tv_client::QueryKey;
use lca_tv_core::format::{format_date, relative_time};
use lca_tv_core::models::AdminUser;
use lca_tv_core::validation::{AdminUserInput, FieldErrors};
use lca_tv_core::{AdminRole, AdminUserId};
use serde::Deserialize;
use tracing::instrument;

use super::{Page, flash_outcome, loaded, rejection_message};
use crate::components::TableColumn;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{CurrentAdmin, RequireAdminAuth, push_flash};
use crate::models::Flash;
use crate::state::AppState;

const LIST_PATH: &str = "/dashboard/users";
const OWN_ACCOUNT: &str = "Vous ne pouvez pas modifier votre propre compte ici";

/// Build the users router (nested under `/dashboard/users`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}/active", post(set_active))
        .route("/{id}/delete", post(delete))
}

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: &'static str,
    pub is_active: bool,
    pub created_at: String,
    pub last_login: String,
    /// The signed-in admin's own row has no actions.
    pub is_self: bool,
}

impl UserRow {
    fn new(user: &AdminUser, current: &AdminUserId) -> Self {
        let now = Utc::now();
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            full_name: user.display_name().to_string(),
            email: user.email.clone(),
            role: user.role_label(),
            is_active: user.is_active,
            created_at: user.created_at.as_ref().map(format_date).unwrap_or_default(),
            last_login: user
                .last_login
                .as_ref()
                .map_or_else(|| "Jamais".to_string(), |t| relative_time(t, &now)),
            is_self: user.id == *current,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct UsersTemplate {
    pub page: Page,
    pub columns: Vec<TableColumn>,
    pub users: Vec<UserRow>,
    pub roles: &'static [AdminRole],
    pub input: AdminUserInput,
    pub errors: FieldErrors,
}

/// User list with the creation form.
///
/// GET /dashboard/users
#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<UsersTemplate, AppError> {
    let page = Page::load(&admin, LIST_PATH).await?;
    render(&state, &admin, page, AdminUserInput::default(), FieldErrors::new()).await
}

/// Create an admin account.
///
/// POST /dashboard/users
#[instrument(skip(admin, state, input))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(input): Form<AdminUserInput>,
) -> Result<Response, AppError> {
    let user = match input.validate() {
        Ok(user) => user,
        Err(errors) => {
            let page = Page::load(&admin, LIST_PATH).await?;
            let view = render(&state, &admin, page, blank_password(input), errors).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, view).into_response());
        }
    };

    match admin.api.users().create(&user).await {
        Ok(created) => {
            tracing::info!(user = %created.username, "Admin user created");
            state.query().invalidate(&QueryKey::Users).await;
            push_flash(
                &admin.session,
                Flash::success(format!("Utilisateur {} créé", created.username)),
            )
            .await?;
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            let message = rejection_message(e)?;
            let page = Page::load(&admin, LIST_PATH)
                .await?
                .with_error(Some(message));
            let view = render(&state, &admin, page, blank_password(input), FieldErrors::new()).await?;
            Ok((StatusCode::BAD_REQUEST, view).into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ActiveForm {
    pub active: bool,
}

/// Activate or deactivate an account.
///
/// POST /dashboard/users/{id}/active
#[instrument(skip(admin, state))]
async fn set_active(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ActiveForm>,
) -> Result<Redirect, AppError> {
    let id = AdminUserId::new(id);
    if id == admin.user.id {
        push_flash(&admin.session, Flash::error(OWN_ACCOUNT)).await?;
        return Ok(Redirect::to(LIST_PATH));
    }
    let message = if form.active {
        "Compte activé"
    } else {
        "Compte désactivé"
    };
    let result = admin.api.users().set_active(&id, form.active).await;
    if flash_outcome(&admin.session, result, message).await?.is_some() {
        state.query().invalidate(&QueryKey::Users).await;
    }
    Ok(Redirect::to(LIST_PATH))
}

/// Delete an account.
///
/// POST /dashboard/users/{id}/delete
#[instrument(skip(admin, state))]
async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = AdminUserId::new(id);
    if id == admin.user.id {
        push_flash(&admin.session, Flash::error(OWN_ACCOUNT)).await?;
        return Ok(Redirect::to(LIST_PATH));
    }
    let result = admin.api.users().delete(&id).await;
    if flash_outcome(&admin.session, result, "Utilisateur supprimé")
        .await?
        .is_some()
    {
        state.query().invalidate(&QueryKey::Users).await;
    }
    Ok(Redirect::to(LIST_PATH))
}

/// Passwords are never echoed back into the form.
fn blank_password(input: AdminUserInput) -> AdminUserInput {
    AdminUserInput {
        password: String::new(),
        ..input
    }
}

async fn render(
    state: &AppState,
    admin: &CurrentAdmin,
    page: Page,
    input: AdminUserInput,
    errors: FieldErrors,
) -> Result<UsersTemplate, AppError> {
    let api = &admin.api;
    let users = state
        .query()
        .fetch(QueryKey::Users, || async move { api.users().list().await })
        .await;
    let (users, error) = loaded(users)?;
    Ok(UsersTemplate {
        page: page.with_error(error),
        columns: vec![
            TableColumn::new("Utilisateur"),
            TableColumn::new("Email"),
            TableColumn::new("Rôle"),
            TableColumn::new("Statut"),
            TableColumn::new("Dernière connexion"),
            TableColumn::new(""),
        ],
        users: users.iter().map(|u| UserRow::new(u, &admin.user.id)).collect(),
        roles: AdminRole::ALL,
        input,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_password_keeps_other_fields() {
        let input = AdminUserInput {
            username: "awa".to_string(),
            password: "secret123".to_string(),
            ..AdminUserInput::default()
        };
        let blanked = blank_password(input);
        assert_eq!(blanked.username, "awa");
        assert!(blanked.password.is_empty());
    }
}
