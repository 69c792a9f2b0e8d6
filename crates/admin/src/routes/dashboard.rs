//! Dashboard overview and its polled fragments.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use lca_tv_client::query::MAX_CONSECUTIVE_FAILURES;
use lca_tv_client::{ApiError, QueryKey};
use lca_tv_core::models::{DashboardStats, RevenueAnalytics};
use lca_tv_core::ticker::FEED_LIMIT;
use serde::Deserialize;
use tracing::instrument;

use super::{Page, loaded};
use crate::components::{RevenueChart, StatCard, TickerView};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(index))
        .route("/dashboard/stats", get(stats))
        .route("/dashboard/ticker", get(ticker))
}

/// Stat cards plus the polling state carried by the fragment itself.
#[derive(Debug, Clone)]
pub struct StatsPanel {
    pub cards: Vec<StatCard>,
    /// Consecutive failed polls so far.
    pub failures: u32,
    pub error: Option<String>,
}

impl StatsPanel {
    fn live(stats: &DashboardStats) -> Self {
        Self {
            cards: StatCard::dashboard(stats),
            failures: 0,
            error: None,
        }
    }

    fn failed(last: Option<&DashboardStats>, failures: u32, error: &ApiError) -> Self {
        Self {
            cards: last.map(StatCard::dashboard).unwrap_or_default(),
            failures,
            error: Some(error.user_message()),
        }
    }

    /// Polling stops after too many consecutive failures.
    #[must_use]
    pub const fn polling(&self) -> bool {
        self.failures < MAX_CONSECUTIVE_FAILURES
    }

    /// URL of the next poll.
    #[must_use]
    pub fn poll_url(&self) -> String {
        if self.failures == 0 {
            "/dashboard/stats".to_string()
        } else {
            format!("/dashboard/stats?failures={}", self.failures)
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub page: Page,
    pub stats: StatsPanel,
    pub chart: RevenueChart,
}

/// Stats fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/_stats.html")]
pub struct StatsTemplate {
    pub stats: StatsPanel,
}

/// Ticker fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/_ticker.html")]
pub struct TickerTemplate {
    pub ticker: Option<TickerView>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub failures: u32,
}

/// Dashboard page handler.
///
/// GET /dashboard
#[instrument(skip(admin, state), fields(admin = %admin.user.username))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<DashboardTemplate, AppError> {
    let api = &admin.api;
    let query = state.query();
    let (stats, revenue) = tokio::join!(
        query.refetch(QueryKey::DashboardStats, || async move {
            api.dashboard().stats().await
        }),
        query.fetch(QueryKey::RevenueAnalytics, || async move {
            api.dashboard().revenue().await
        }),
    );

    let stats = match stats {
        Ok(stats) => StatsPanel::live(&stats),
        Err(e) if e.is_unauthorized() => return Err(e.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load dashboard stats");
            StatsPanel::failed(None, 1, &e)
        }
    };
    let (revenue, error) = loaded::<Option<RevenueAnalytics>>(revenue.map(Some))?;

    Ok(DashboardTemplate {
        page: Page::load(&admin, "/dashboard").await?.with_error(error),
        stats,
        chart: revenue.as_ref().map(RevenueChart::from).unwrap_or_default(),
    })
}

/// Stats fragment, polled by htmx every 30 seconds.
///
/// Each poll is a single attempt. A failure keeps the last cached figures
/// and bumps the counter carried in the next poll URL; the fragment stops
/// polling once the limit is reached. A 401 propagates to the expiry
/// middleware.
///
/// GET /dashboard/stats
#[instrument(skip(admin, state))]
async fn stats(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<StatsTemplate, AppError> {
    let api = &admin.api;
    let result = state
        .query()
        .poll(QueryKey::DashboardStats, || async move {
            api.dashboard().stats().await
        })
        .await;

    let stats = match result {
        Ok(stats) => StatsPanel::live(&stats),
        Err(e) if e.is_unauthorized() => return Err(e.into()),
        Err(e) => {
            let failures = params.failures.saturating_add(1);
            tracing::warn!(error = %e, failures, "Stats refresh failed");
            let last = state
                .query()
                .peek::<DashboardStats>(&QueryKey::DashboardStats)
                .await;
            StatsPanel::failed(last.as_ref(), failures, &e)
        }
    };
    Ok(StatsTemplate { stats })
}

/// Ticker fragment. Fetches the feed afresh on every mount; any failure
/// falls back to the built-in items.
///
/// GET /dashboard/ticker
#[instrument(skip(_admin, state))]
async fn ticker(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> TickerTemplate {
    // Public feed: fetched without the admin token so it can never expire
    // the session.
    let feed = state
        .api()
        .content()
        .breaking_news(u32::try_from(FEED_LIMIT).ok())
        .await;
    if let Err(e) = &feed {
        tracing::warn!(error = %e, "Ticker feed unavailable, using fallback");
    }
    TickerTemplate {
        ticker: TickerView::from_feed(&feed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_panel_stops_polling_after_limit() {
        let error = ApiError::Api {
            status: 503,
            message: "down".to_string(),
        };
        let first = StatsPanel::failed(None, 1, &error);
        assert!(first.polling());
        assert_eq!(first.poll_url(), "/dashboard/stats?failures=1");

        let stopped = StatsPanel::failed(None, MAX_CONSECUTIVE_FAILURES, &error);
        assert!(!stopped.polling());
    }
}
