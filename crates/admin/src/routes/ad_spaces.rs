//! Ad space route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use lca_tv_client::QueryKey;
use lca_tv_core::AdSpaceId;
use lca_tv_core::format::format_currency;
use lca_tv_core::models::AdSpace;
use lca_tv_core::validation::{AdSpaceInput, FieldErrors};
use tracing::instrument;

use super::{Page, flash_outcome, loaded, rejection_message};
use crate::components::TableColumn;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdminAuth, push_flash};
use crate::models::Flash;
use crate::state::AppState;

const LIST_PATH: &str = "/dashboard/ad-spaces";

/// Placement positions offered by the creation form.
pub const POSITIONS: [&str; 5] = ["header", "sidebar", "footer", "banner", "popup"];

/// Build the ad spaces router (nested under `/dashboard/ad-spaces`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", post(update))
        .route("/{id}/delete", post(delete))
}

/// Ad space row, with the raw prices the inline edit form needs.
#[derive(Debug, Clone)]
pub struct AdSpaceRow {
    pub id: String,
    pub name: String,
    pub position: String,
    pub dimensions: String,
    pub per_day: String,
    pub per_week: String,
    pub per_month: String,
    pub is_active: bool,
    pub input: AdSpaceInput,
}

impl From<&AdSpace> for AdSpaceRow {
    fn from(space: &AdSpace) -> Self {
        Self {
            id: space.id.to_string(),
            name: space.name.clone(),
            position: space.position.clone(),
            dimensions: space.dimensions.to_string(),
            per_day: format_currency(space.price_per_day),
            per_week: format_currency(space.price_per_week),
            per_month: format_currency(space.price_per_month),
            is_active: space.is_active,
            input: AdSpaceInput {
                name: space.name.clone(),
                position: space.position.clone(),
                width: space.dimensions.width.to_string(),
                height: space.dimensions.height.to_string(),
                price_per_day: space.price_per_day.amount().to_string(),
                price_per_week: space.price_per_week.amount().to_string(),
                price_per_month: space.price_per_month.amount().to_string(),
            },
        }
    }
}

/// List page with the creation form.
#[derive(Template, WebTemplate)]
#[template(path = "ad_spaces/index.html")]
pub struct AdSpacesTemplate {
    pub page: Page,
    pub columns: Vec<TableColumn>,
    pub spaces: Vec<AdSpaceRow>,
    pub positions: [&'static str; 5],
    pub input: AdSpaceInput,
    pub errors: FieldErrors,
}

/// Ad space list.
///
/// GET /dashboard/ad-spaces
#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<AdSpacesTemplate, AppError> {
    let page = Page::load(&admin, LIST_PATH).await?;
    render(&state, &admin.api, page, AdSpaceInput::default(), FieldErrors::new()).await
}

/// Create an ad space.
///
/// POST /dashboard/ad-spaces
#[instrument(skip(admin, state, input))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(input): Form<AdSpaceInput>,
) -> Result<Response, AppError> {
    let space = match input.validate() {
        Ok(space) => space,
        Err(errors) => {
            let page = Page::load(&admin, LIST_PATH).await?;
            let view = render(&state, &admin.api, page, input, errors).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, view).into_response());
        }
    };

    match admin.api.ad_spaces().create(&space).await {
        Ok(created) => {
            tracing::info!(ad_space = %created.id, "Ad space created");
            state.query().invalidate(&QueryKey::AdSpaces).await;
            push_flash(&admin.session, Flash::success("Espace publicitaire créé")).await?;
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            let message = rejection_message(e)?;
            let page = Page::load(&admin, LIST_PATH)
                .await?
                .with_error(Some(message));
            let view = render(&state, &admin.api, page, input, FieldErrors::new()).await?;
            Ok((StatusCode::BAD_REQUEST, view).into_response())
        }
    }
}

/// Replace an ad space from its inline edit form.
///
/// POST /dashboard/ad-spaces/{id}
#[instrument(skip(admin, state, input))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<AdSpaceInput>,
) -> Result<Redirect, AppError> {
    match input.validate() {
        Ok(space) => {
            let result = admin.api.ad_spaces().update(&AdSpaceId::new(id), &space).await;
            if flash_outcome(&admin.session, result, "Espace publicitaire mis à jour")
                .await?
                .is_some()
            {
                state.query().invalidate(&QueryKey::AdSpaces).await;
            }
        }
        Err(errors) => {
            push_flash(&admin.session, Flash::error(errors.to_string())).await?;
        }
    }
    Ok(Redirect::to(LIST_PATH))
}

/// Delete an ad space.
///
/// POST /dashboard/ad-spaces/{id}/delete
#[instrument(skip(admin, state))]
async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let result = admin.api.ad_spaces().delete(&AdSpaceId::new(id)).await;
    if flash_outcome(&admin.session, result, "Espace publicitaire supprimé")
        .await?
        .is_some()
    {
        state.query().invalidate(&QueryKey::AdSpaces).await;
    }
    Ok(Redirect::to(LIST_PATH))
}

async fn render(
    state: &AppState,
    api: &lca_tv_client::ApiClient,
    page: Page,
    input: AdSpaceInput,
    errors: FieldErrors,
) -> Result<AdSpacesTemplate, AppError> {
    let spaces = state
        .query()
        .fetch(QueryKey::AdSpaces, || async move { api.ad_spaces().list().await })
        .await;
    let (spaces, error) = loaded(spaces)?;
    Ok(AdSpacesTemplate {
        page: page.with_error(error),
        columns: vec![
            TableColumn::new("Nom"),
            TableColumn::new("Position"),
            TableColumn::new("Dimensions"),
            TableColumn::numeric("Jour"),
            TableColumn::numeric("Semaine"),
            TableColumn::numeric("Mois"),
            TableColumn::new("Statut"),
            TableColumn::new(""),
        ],
        spaces: spaces.iter().map(AdSpaceRow::from).collect(),
        positions: POSITIONS,
        input,
        errors,
    })
}
