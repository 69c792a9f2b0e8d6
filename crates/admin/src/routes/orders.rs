//! Ad order route handlers.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use lca_tv_client::{ApiClient, QueryClient, QueryKey};
use lca_tv_core::format::{format_currency, format_date, format_number};
use lca_tv_core::models::{AdOrder, AdSpace, Client, OrderStatusUpdate};
use lca_tv_core::pricing::{InvoicePreview, PricingTier, estimate_range};
use lca_tv_core::validation::{FieldErrors, OrderInput, parse_form_date};
use lca_tv_core::{AdOrderId, ContentType, OrderStatus, PaymentStatus};
use serde::Deserialize;
use tracing::instrument;

use super::{Page, flash_outcome, loaded, rejection_message};
use crate::components::{FilterOption, TableColumn};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{CurrentAdmin, RequireAdminAuth, push_flash};
use crate::models::Flash;
use crate::state::AppState;

const LIST_PATH: &str = "/dashboard/orders";

/// Build the orders router (nested under `/dashboard/orders`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/new", get(new_form))
        .route("/estimate", get(estimate))
        .route("/{id}/status", post(update_status))
        .route("/{id}/delete", post(delete))
}

// =============================================================================
// Views
// =============================================================================

/// Order row for list templates.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: String,
    pub client: String,
    pub ad_space: String,
    pub content_type: &'static str,
    pub period: String,
    pub duration: String,
    pub amount: String,
    pub invoice_number: String,
    pub total_with_tax: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub impressions: String,
    pub clicks: String,
    pub ctr: String,
}

impl OrderRow {
    /// Resolve names through the lookup maps; unknown ids are shown raw.
    #[must_use]
    pub fn new(
        order: &AdOrder,
        clients: &HashMap<String, String>,
        spaces: &HashMap<String, String>,
    ) -> Self {
        let invoice = InvoicePreview::new(
            &order.id,
            order.total_amount,
            order.created_at.unwrap_or(order.start_date),
        );
        Self {
            id: order.id.to_string(),
            client: name_or_id(clients, order.client_id.as_str()),
            ad_space: name_or_id(spaces, order.ad_space_id.as_str()),
            content_type: order.content_type.label(),
            period: format!(
                "{} → {}",
                format_date(&order.start_date),
                format_date(&order.end_date)
            ),
            duration: format!("{} jours", order.duration_days),
            amount: format_currency(order.total_amount),
            invoice_number: invoice.invoice_number,
            total_with_tax: format_currency(invoice.total_amount),
            status: order.status,
            payment_status: order.payment_status,
            impressions: format_number(i64::try_from(order.impressions).unwrap_or(i64::MAX)),
            clicks: format_number(i64::try_from(order.clicks).unwrap_or(i64::MAX)),
            ctr: format!("{:.2}%", order.ctr()),
        }
    }
}

fn name_or_id(names: &HashMap<String, String>, id: &str) -> String {
    names.get(id).cloned().unwrap_or_else(|| id.to_string())
}

/// Client id -> company name.
#[must_use]
pub fn client_names(clients: &[Client]) -> HashMap<String, String> {
    clients
        .iter()
        .map(|c| (c.id.to_string(), c.company_name.clone()))
        .collect()
}

/// Ad space id -> name.
#[must_use]
pub fn space_names(spaces: &[AdSpace]) -> HashMap<String, String> {
    spaces
        .iter()
        .map(|s| (s.id.to_string(), s.name.clone()))
        .collect()
}

/// `<option>` for a select input.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Order list page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub page: Page,
    pub columns: Vec<TableColumn>,
    pub filters: Vec<FilterOption>,
    pub orders: Vec<OrderRow>,
    pub statuses: &'static [OrderStatus],
    pub payment_statuses: &'static [PaymentStatus],
}

/// Order creation form template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/new.html")]
pub struct NewOrderTemplate {
    pub page: Page,
    pub input: OrderInput,
    pub errors: FieldErrors,
    pub clients: Vec<SelectOption>,
    pub ad_spaces: Vec<SelectOption>,
    pub content_types: &'static [ContentType],
}

/// Price estimate shown next to the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateView {
    pub days: i64,
    pub tier: &'static str,
    pub amount: String,
}

/// Estimate fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/_estimate.html")]
pub struct EstimateTemplate {
    pub estimate: Option<EstimateView>,
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
}

/// Order list, optionally filtered by status.
///
/// GET /dashboard/orders
#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<OrdersQuery>,
) -> Result<OrdersIndexTemplate, AppError> {
    let api = &admin.api;
    let query = state.query();
    let (orders, clients, spaces) = tokio::join!(
        query.fetch(QueryKey::Orders, || async move { api.orders().list().await }),
        query.fetch(QueryKey::Clients, || async move { api.clients().list().await }),
        query.fetch(QueryKey::AdSpaces, || async move { api.ad_spaces().list().await }),
    );
    let (orders, error) = loaded(orders)?;
    let (clients, _) = loaded(clients)?;
    let (spaces, _) = loaded(spaces)?;

    let current = params
        .status
        .as_deref()
        .and_then(|s| s.parse::<OrderStatus>().ok());
    let current_value = current.map_or("", |s| s.as_str());

    let filters = std::iter::once(FilterOption::new("", "Toutes", orders.len()))
        .chain(OrderStatus::ALL.iter().map(|status| {
            let count = orders.iter().filter(|o| o.status == *status).count();
            FilterOption::new(status.as_str(), status.label(), count)
        }))
        .map(|f| f.selected_if(current_value))
        .collect();

    let (clients, spaces) = (client_names(&clients), space_names(&spaces));
    let rows = orders
        .iter()
        .filter(|o| current.is_none_or(|s| o.status == s))
        .map(|o| OrderRow::new(o, &clients, &spaces))
        .collect();

    Ok(OrdersIndexTemplate {
        page: Page::load(&admin, LIST_PATH).await?.with_error(error),
        columns: vec![
            TableColumn::new("Client"),
            TableColumn::new("Espace"),
            TableColumn::new("Période"),
            TableColumn::numeric("Montant"),
            TableColumn::numeric("Performance"),
            TableColumn::new("Statut"),
            TableColumn::new("Paiement"),
            TableColumn::new(""),
        ],
        filters,
        orders: rows,
        statuses: OrderStatus::ALL,
        payment_statuses: PaymentStatus::ALL,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct NewOrderQuery {
    pub client_id: Option<String>,
}

/// Order creation form.
///
/// GET /dashboard/orders/new
#[instrument(skip(admin, state))]
async fn new_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<NewOrderQuery>,
) -> Result<NewOrderTemplate, AppError> {
    let (clients, spaces, error) = load_choices(state.query(), &admin.api).await?;
    let input = OrderInput {
        client_id: params.client_id.unwrap_or_default(),
        ..OrderInput::default()
    };
    Ok(NewOrderTemplate {
        page: Page::load(&admin, LIST_PATH).await?.with_error(error),
        input,
        errors: FieldErrors::new(),
        clients: client_options(&clients),
        ad_spaces: space_options(&spaces),
        content_types: ContentType::ALL,
    })
}

/// Create an order.
///
/// Validation runs before anything else; an invalid form is re-rendered
/// with inline messages and never reaches the backend.
///
/// POST /dashboard/orders
#[instrument(skip(admin, state, input))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(input): Form<OrderInput>,
) -> Result<Response, AppError> {
    let order = match input.validate() {
        Ok(order) => order,
        Err(errors) => {
            tracing::debug!(%errors, "Order form rejected");
            let page = Page::load(&admin, LIST_PATH).await?;
            let form = rerender(state.query(), page, input, errors).await;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, form).into_response());
        }
    };

    match admin.api.orders().create(&order).await {
        Ok(created) => {
            tracing::info!(order = %created.id, amount = %created.total_amount, "Order created");
            state.query().invalidate(&QueryKey::Orders).await;
            push_flash(
                &admin.session,
                Flash::success(format!(
                    "Commande créée ({})",
                    format_currency(created.total_amount)
                )),
            )
            .await?;
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            let status = e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            let message = rejection_message(e)?;
            let page = Page::load(&admin, LIST_PATH).await?.with_error(Some(message));
            let form = rerender(state.query(), page, input, FieldErrors::new()).await;
            Ok((status, form).into_response())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EstimateQuery {
    #[serde(default)]
    pub ad_space_id: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Live price estimate for the order form.
///
/// GET /dashboard/orders/estimate
#[instrument(skip(admin, state))]
async fn estimate(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<EstimateQuery>,
) -> Result<EstimateTemplate, AppError> {
    let (start, end) = (
        parse_form_date(&params.start_date),
        parse_form_date(&params.end_date),
    );
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(EstimateTemplate { estimate: None });
    };

    let api = &admin.api;
    let spaces = state
        .query()
        .fetch(QueryKey::AdSpaces, || async move { api.ad_spaces().list().await })
        .await;
    let (spaces, _) = loaded(spaces)?;

    let estimate = spaces
        .iter()
        .find(|s| s.id.as_str() == params.ad_space_id)
        .filter(|_| end > start)
        .map(|space| {
            let days = (end - start).num_days();
            EstimateView {
                days,
                tier: PricingTier::for_days(days).label(),
                amount: format_currency(estimate_range(space, start, end)),
            }
        });
    Ok(EstimateTemplate { estimate })
}

/// Raw status form: empty strings mean "unchanged".
#[derive(Debug, Default, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_status: String,
}

impl StatusForm {
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for unknown values.
    pub fn to_update(&self) -> Result<OrderStatusUpdate, AppError> {
        let status = parse_optional::<OrderStatus>(&self.status)?;
        let payment_status = parse_optional::<PaymentStatus>(&self.payment_status)?;
        Ok(OrderStatusUpdate {
            status,
            payment_status,
        })
    }
}

fn parse_optional<T>(value: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|e: T::Err| AppError::BadRequest(e.to_string()))
}

/// Update order and/or payment status.
///
/// POST /dashboard/orders/{id}/status
#[instrument(skip(admin, state, form))]
async fn update_status(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let update = form.to_update()?;
    if update.is_empty() {
        push_flash(&admin.session, Flash::error("Aucune modification à enregistrer")).await?;
        return Ok(Redirect::to(LIST_PATH));
    }

    let result = admin
        .api
        .orders()
        .update_status(&AdOrderId::new(id), &update)
        .await;
    if flash_outcome(&admin.session, result, "Statut mis à jour")
        .await?
        .is_some()
    {
        state.query().invalidate(&QueryKey::Orders).await;
    }
    Ok(Redirect::to(LIST_PATH))
}

/// Delete an order.
///
/// POST /dashboard/orders/{id}/delete
#[instrument(skip(admin, state))]
async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let result = admin.api.orders().delete(&AdOrderId::new(id)).await;
    if flash_outcome(&admin.session, result, "Commande supprimée")
        .await?
        .is_some()
    {
        state.query().invalidate(&QueryKey::Orders).await;
    }
    Ok(Redirect::to(LIST_PATH))
}

// =============================================================================
// Helpers
// =============================================================================

/// Clients and ad spaces for the form selects.
async fn load_choices(
    query: &QueryClient,
    api: &ApiClient,
) -> Result<(Vec<Client>, Vec<AdSpace>, Option<String>), AppError> {
    let (clients, spaces) = tokio::join!(
        query.fetch(QueryKey::Clients, || async move { api.clients().list().await }),
        query.fetch(QueryKey::AdSpaces, || async move { api.ad_spaces().list().await }),
    );
    let (clients, client_error) = loaded(clients)?;
    let (spaces, space_error) = loaded(spaces)?;
    Ok((clients, spaces, client_error.or(space_error)))
}

/// Re-render the form from cached choices only, without any backend call.
async fn rerender(
    query: &QueryClient,
    page: Page,
    input: OrderInput,
    errors: FieldErrors,
) -> NewOrderTemplate {
    let clients: Vec<Client> = query.peek(&QueryKey::Clients).await.unwrap_or_default();
    let spaces: Vec<AdSpace> = query.peek(&QueryKey::AdSpaces).await.unwrap_or_default();
    NewOrderTemplate {
        page,
        input,
        errors,
        clients: client_options(&clients),
        ad_spaces: space_options(&spaces),
        content_types: ContentType::ALL,
    }
}

fn client_options(clients: &[Client]) -> Vec<SelectOption> {
    clients
        .iter()
        .filter(|c| c.is_active)
        .map(|c| SelectOption {
            value: c.id.to_string(),
            label: c.company_name.clone(),
        })
        .collect()
}

fn space_options(spaces: &[AdSpace]) -> Vec<SelectOption> {
    spaces
        .iter()
        .filter(|s| s.is_active)
        .map(|s| SelectOption {
            value: s.id.to_string(),
            label: format!("{} ({}) - {}/jour", s.name, s.dimensions, s.price_per_day),
        })
        .collect()
}

/// Current admin's view of an order list, used by the client detail page.
pub(crate) async fn orders_for(
    state: &AppState,
    admin: &CurrentAdmin,
) -> Result<(Vec<AdOrder>, Vec<AdSpace>), AppError> {
    let api = &admin.api;
    let query = state.query();
    let (orders, spaces) = tokio::join!(
        query.fetch(QueryKey::Orders, || async move { api.orders().list().await }),
        query.fetch(QueryKey::AdSpaces, || async move { api.ad_spaces().list().await }),
    );
    Ok((loaded(orders)?.0, loaded(spaces)?.0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_form_parsing() {
        let form = StatusForm {
            status: "active".to_string(),
            payment_status: String::new(),
        };
        let update = form.to_update().unwrap();
        assert_eq!(update.status, Some(OrderStatus::Active));
        assert!(update.payment_status.is_none());

        let empty = StatusForm::default().to_update().unwrap();
        assert!(empty.is_empty());

        let bogus = StatusForm {
            status: "shipped".to_string(),
            payment_status: String::new(),
        };
        assert!(matches!(bogus.to_update(), Err(AppError::BadRequest(_))));
    }
}
