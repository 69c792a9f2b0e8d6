//! Dashboard statistics and analytics.

use lca_tv_core::models::{DashboardStats, PerformanceAnalytics, RevenueAnalytics};
use tracing::instrument;

use crate::error::Result;

endpoint_family!(
    /// Headline figures and analytics series.
    DashboardApi
);

impl DashboardApi<'_> {
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats> {
        self.client.get("/admin/dashboard/stats").await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn revenue(&self) -> Result<RevenueAnalytics> {
        self.client.get("/admin/analytics/revenue").await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn performance(&self) -> Result<PerformanceAnalytics> {
        self.client.get("/admin/analytics/performance").await
    }
}
