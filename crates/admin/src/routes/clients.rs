//! Advertising client route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use lca_tv_client::{ApiError, QueryKey};
use lca_tv_core::ClientId;
use lca_tv_core::format::{format_currency, format_date, format_phone};
use lca_tv_core::models::Client;
use lca_tv_core::validation::{ClientInput, FieldErrors};
use tracing::instrument;

use super::orders::{OrderRow, client_names, orders_for, space_names};
use super::{Page, flash_outcome, loaded, rejection_message};
use crate::components::TableColumn;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{CurrentAdmin, RequireAdminAuth, push_flash};
use crate::models::Flash;
use crate::state::AppState;

const LIST_PATH: &str = "/dashboard/clients";

/// Build the clients router (nested under `/dashboard/clients`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/new", get(new_form))
        .route("/{id}", get(show).post(update))
        .route("/{id}/delete", post(delete))
}

/// Client row for list templates.
#[derive(Debug, Clone)]
pub struct ClientRow {
    pub id: String,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub total_spent: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.to_string(),
            company_name: client.company_name.clone(),
            contact_person: client.contact_person.clone(),
            email: client.email.clone(),
            phone: format_phone(&client.phone),
            total_spent: format_currency(client.total_spent),
            is_active: client.is_active,
            created_at: client
                .created_at
                .as_ref()
                .map(format_date)
                .unwrap_or_default(),
        }
    }
}

fn input_from(client: &Client) -> ClientInput {
    ClientInput {
        company_name: client.company_name.clone(),
        contact_person: client.contact_person.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        address: client.address.clone(),
    }
}

/// Client list page template.
#[derive(Template, WebTemplate)]
#[template(path = "clients/index.html")]
pub struct ClientsIndexTemplate {
    pub page: Page,
    pub columns: Vec<TableColumn>,
    pub clients: Vec<ClientRow>,
}

/// Create/edit form template. `client` is set when editing.
#[derive(Template, WebTemplate)]
#[template(path = "clients/form.html")]
pub struct ClientFormTemplate {
    pub page: Page,
    pub client: Option<ClientRow>,
    pub input: ClientInput,
    pub errors: FieldErrors,
    pub orders: Vec<OrderRow>,
}

impl ClientFormTemplate {
    /// Form target.
    #[must_use]
    pub fn action(&self) -> String {
        self.client
            .as_ref()
            .map_or_else(|| LIST_PATH.to_string(), |c| format!("{LIST_PATH}/{}", c.id))
    }
}

/// Client list.
///
/// GET /dashboard/clients
#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<ClientsIndexTemplate, AppError> {
    let api = &admin.api;
    let clients = state
        .query()
        .fetch(QueryKey::Clients, || async move { api.clients().list().await })
        .await;
    let (clients, error) = loaded(clients)?;

    Ok(ClientsIndexTemplate {
        page: Page::load(&admin, LIST_PATH).await?.with_error(error),
        columns: vec![
            TableColumn::new("Entreprise"),
            TableColumn::new("Contact"),
            TableColumn::new("Téléphone"),
            TableColumn::numeric("Total dépensé"),
            TableColumn::new("Statut"),
            TableColumn::new("Créé le"),
        ],
        clients: clients.iter().map(ClientRow::from).collect(),
    })
}

/// Empty creation form.
///
/// GET /dashboard/clients/new
async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> Result<ClientFormTemplate, AppError> {
    Ok(ClientFormTemplate {
        page: Page::load(&admin, LIST_PATH).await?,
        client: None,
        input: ClientInput::default(),
        errors: FieldErrors::new(),
        orders: Vec::new(),
    })
}

/// Create a client.
///
/// POST /dashboard/clients
#[instrument(skip(admin, state, input))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(input): Form<ClientInput>,
) -> Result<Response, AppError> {
    let client = match input.validate() {
        Ok(client) => client,
        Err(errors) => return form_error(&admin, None, input, errors, None).await,
    };

    match admin.api.clients().create(&client).await {
        Ok(created) => {
            tracing::info!(client = %created.id, "Client created");
            state.query().invalidate(&QueryKey::Clients).await;
            push_flash(&admin.session, Flash::success("Client créé avec succès")).await?;
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => form_error(&admin, None, input, FieldErrors::new(), Some(e)).await,
    }
}

/// Client detail with edit form and the client's orders.
///
/// GET /dashboard/clients/{id}
#[instrument(skip(admin, state))]
async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ClientFormTemplate, AppError> {
    let id = ClientId::new(id);
    let api = &admin.api;
    let client = state
        .query()
        .fetch(QueryKey::Client(id.clone()), || {
            let id = id.clone();
            async move { api.clients().get(&id).await }
        })
        .await?;

    let (orders, spaces) = orders_for(&state, &admin).await?;
    let (clients, spaces) = (client_names(std::slice::from_ref(&client)), space_names(&spaces));
    let orders = orders
        .iter()
        .filter(|o| o.client_id == client.id)
        .map(|o| OrderRow::new(o, &clients, &spaces))
        .collect();

    Ok(ClientFormTemplate {
        page: Page::load(&admin, LIST_PATH).await?,
        client: Some(ClientRow::from(&client)),
        input: input_from(&client),
        errors: FieldErrors::new(),
        orders,
    })
}

/// Update a client.
///
/// POST /dashboard/clients/{id}
#[instrument(skip(admin, state, input))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<ClientInput>,
) -> Result<Response, AppError> {
    let id = ClientId::new(id);
    let target = ClientRow {
        id: id.to_string(),
        company_name: input.company_name.clone(),
        contact_person: input.contact_person.clone(),
        email: input.email.clone(),
        phone: input.phone.clone(),
        total_spent: String::new(),
        is_active: true,
        created_at: String::new(),
    };
    let client = match input.validate() {
        Ok(client) => client,
        Err(errors) => return form_error(&admin, Some(target), input, errors, None).await,
    };

    match admin.api.clients().update(&id, &client).await {
        Ok(_) => {
            state.query().invalidate(&QueryKey::Client(id.clone())).await;
            push_flash(&admin.session, Flash::success("Client mis à jour")).await?;
            Ok(Redirect::to(&format!("{LIST_PATH}/{id}")).into_response())
        }
        Err(e) => form_error(&admin, Some(target), input, FieldErrors::new(), Some(e)).await,
    }
}

/// Delete a client.
///
/// POST /dashboard/clients/{id}/delete
#[instrument(skip(admin, state))]
async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = ClientId::new(id);
    let result = admin.api.clients().delete(&id).await;
    if flash_outcome(&admin.session, result, "Client supprimé")
        .await?
        .is_some()
    {
        state.query().invalidate(&QueryKey::Client(id)).await;
    }
    Ok(Redirect::to(LIST_PATH))
}

/// Re-render the form after a validation or backend failure.
async fn form_error(
    admin: &CurrentAdmin,
    client: Option<ClientRow>,
    input: ClientInput,
    errors: FieldErrors,
    backend: Option<ApiError>,
) -> Result<Response, AppError> {
    let (status, message) = match backend {
        Some(e) => {
            let status = e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Some(rejection_message(e)?))
        }
        None => (StatusCode::UNPROCESSABLE_ENTITY, None),
    };
    let form = ClientFormTemplate {
        page: Page::load(admin, LIST_PATH).await?.with_error(message),
        client,
        input,
        errors,
        orders: Vec::new(),
    };
    Ok((status, form).into_response())
}
