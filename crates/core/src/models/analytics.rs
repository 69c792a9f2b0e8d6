//! Dashboard statistics and analytics DTOs.

use serde::{Deserialize, Serialize};

use crate::format::percentage;
use crate::types::{AdOrderId, Money};

/// Headline figures for the dashboard overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    pub total_clients: u64,
    pub active_orders: u64,
    pub monthly_revenue: Money,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub pending_payments: Money,
}

impl DashboardStats {
    /// Overall click-through rate in percent.
    #[must_use]
    pub fn click_through_rate(&self) -> f64 {
        percentage(self.total_clicks, self.total_impressions)
    }
}

/// Paid revenue for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// Month label as sent by the backend (e.g. "March 2024").
    pub month: String,
    pub revenue: Money,
    pub orders_count: u64,
}

/// Twelve-month revenue series, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RevenueAnalytics {
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub total_revenue: Money,
    pub average_monthly_revenue: Money,
    pub growth_rate: f64,
}

impl RevenueAnalytics {
    /// Largest monthly revenue, used to scale chart bars.
    #[must_use]
    pub fn peak(&self) -> Money {
        self.monthly_revenue
            .iter()
            .map(|m| m.revenue)
            .max()
            .unwrap_or(Money::ZERO)
    }
}

/// Delivery figures for one running or finished order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPerformance {
    pub order_id: AdOrderId,
    pub client_name: String,
    pub ad_space_name: String,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub amount: Money,
    /// Raw order status; the backend may send "unknown".
    pub status: String,
}

/// Performance of active and completed orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceAnalytics {
    pub performance_data: Vec<OrderPerformance>,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub average_ctr: f64,
}
