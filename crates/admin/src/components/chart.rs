//! CSS bar chart for monthly revenue.

use lca_tv_core::format::format_currency;
use lca_tv_core::models::RevenueAnalytics;

/// One month's bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueBar {
    pub month: String,
    pub amount: String,
    pub orders: u64,
    /// Bar height relative to the best month.
    pub height_pct: u8,
}

/// Revenue chart with its summary figures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevenueChart {
    pub bars: Vec<RevenueBar>,
    pub total: String,
    pub average: String,
    pub growth: String,
    pub growth_positive: bool,
}

impl RevenueChart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl From<&RevenueAnalytics> for RevenueChart {
    fn from(analytics: &RevenueAnalytics) -> Self {
        let peak = analytics.peak();
        let bars = analytics
            .monthly_revenue
            .iter()
            .map(|m| RevenueBar {
                month: m.month.clone(),
                amount: format_currency(m.revenue),
                orders: m.orders_count,
                height_pct: m.revenue.percent_of(peak),
            })
            .collect();
        Self {
            bars,
            total: format_currency(analytics.total_revenue),
            average: format_currency(analytics.average_monthly_revenue),
            growth: format!("{:+.1}%", analytics.growth_rate),
            growth_positive: analytics.growth_rate >= 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use lca_tv_core::Money;
    use lca_tv_core::models::MonthlyRevenue;

    use super::*;

    #[test]
    fn test_bars_scale_to_best_month() {
        let analytics = RevenueAnalytics {
            monthly_revenue: vec![
                MonthlyRevenue {
                    month: "2024-01".to_string(),
                    revenue: Money::from_francs(400_000),
                    orders_count: 2,
                },
                MonthlyRevenue {
                    month: "2024-02".to_string(),
                    revenue: Money::from_francs(800_000),
                    orders_count: 5,
                },
            ],
            total_revenue: Money::from_francs(1_200_000),
            average_monthly_revenue: Money::from_francs(600_000),
            growth_rate: -12.5,
        };
        let chart = RevenueChart::from(&analytics);

        let heights: Vec<u8> = chart.bars.iter().map(|b| b.height_pct).collect();
        assert_eq!(heights, [50, 100]);
        assert_eq!(chart.growth, "-12.5%");
        assert!(!chart.growth_positive);
    }
}
