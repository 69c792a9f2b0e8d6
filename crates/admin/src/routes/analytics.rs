//! Revenue and campaign performance.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use lca_tv_client::QueryKey;
use lca_tv_core::OrderStatus;
use lca_tv_core::format::{format_currency, format_number};
use lca_tv_core::models::{OrderPerformance, PerformanceAnalytics};
use tracing::instrument;

use super::{Page, loaded};
use crate::components::{RevenueChart, TableColumn};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// One row of the performance table.
#[derive(Debug, Clone)]
pub struct PerformanceRow {
    pub order_id: String,
    pub client: String,
    pub ad_space: String,
    pub impressions: String,
    pub clicks: String,
    pub ctr: String,
    pub amount: String,
    pub status: String,
    pub badge: &'static str,
}

impl From<&OrderPerformance> for PerformanceRow {
    fn from(p: &OrderPerformance) -> Self {
        // Unrecognised statuses are shown verbatim.
        let (status, badge) = p.status.parse::<OrderStatus>().map_or_else(
            |_| (p.status.clone(), "badge-muted"),
            |s| (s.label().to_string(), s.badge_class()),
        );
        Self {
            order_id: p.order_id.to_string(),
            client: p.client_name.clone(),
            ad_space: p.ad_space_name.clone(),
            impressions: count(p.impressions),
            clicks: count(p.clicks),
            ctr: format!("{:.2}%", p.ctr),
            amount: format_currency(p.amount),
            status,
            badge,
        }
    }
}

/// Performance totals above the table.
#[derive(Debug, Clone, Default)]
pub struct PerformanceSummary {
    pub impressions: String,
    pub clicks: String,
    pub average_ctr: String,
}

impl From<&PerformanceAnalytics> for PerformanceSummary {
    fn from(p: &PerformanceAnalytics) -> Self {
        Self {
            impressions: count(p.total_impressions),
            clicks: count(p.total_clicks),
            average_ctr: format!("{:.2}%", p.average_ctr),
        }
    }
}

fn count(value: u64) -> String {
    format_number(i64::try_from(value).unwrap_or(i64::MAX))
}

#[derive(Template, WebTemplate)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub page: Page,
    pub chart: RevenueChart,
    pub summary: PerformanceSummary,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<PerformanceRow>,
}

/// Analytics page.
///
/// GET /dashboard/analytics
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<AnalyticsTemplate, AppError> {
    let api = &admin.api;
    let query = state.query();
    let (revenue, performance) = tokio::join!(
        query.fetch(QueryKey::RevenueAnalytics, || async move {
            api.dashboard().revenue().await
        }),
        query.fetch(QueryKey::PerformanceAnalytics, || async move {
            api.dashboard().performance().await
        }),
    );
    let (revenue, revenue_error) = loaded(revenue)?;
    let (performance, performance_error) = loaded(performance)?;

    Ok(AnalyticsTemplate {
        page: Page::load(&admin, "/dashboard/analytics")
            .await?
            .with_error(revenue_error.or(performance_error)),
        chart: RevenueChart::from(&revenue),
        summary: PerformanceSummary::from(&performance),
        columns: vec![
            TableColumn::new("Commande"),
            TableColumn::new("Client"),
            TableColumn::new("Espace"),
            TableColumn::numeric("Impressions"),
            TableColumn::numeric("Clics"),
            TableColumn::numeric("CTR"),
            TableColumn::numeric("Montant"),
            TableColumn::new("Statut"),
        ],
        rows: performance.performance_data.iter().map(PerformanceRow::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use lca_tv_core::{AdOrderId, Money};

    use super::*;

    fn performance(status: &str) -> OrderPerformance {
        OrderPerformance {
            order_id: AdOrderId::new("o1"),
            client_name: "Brakina".to_string(),
            ad_space_name: "Bannière".to_string(),
            impressions: 12_500,
            clicks: 250,
            ctr: 2.0,
            amount: Money::from_francs(150_000),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_row_formats_known_status() {
        let row = PerformanceRow::from(&performance("active"));
        assert_eq!(row.status, OrderStatus::Active.label());
        assert_eq!(row.ctr, "2.00%");
        assert_eq!(row.amount, format_currency(Money::from_francs(150_000)));
    }

    #[test]
    fn test_row_keeps_unknown_status() {
        let row = PerformanceRow::from(&performance("unknown"));
        assert_eq!(row.status, "unknown");
        assert_eq!(row.badge, "badge-muted");
    }
}
