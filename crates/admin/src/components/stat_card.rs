//! Dashboard stat cards.

use lca_tv_core::format::{format_currency, format_number};
use lca_tv_core::models::DashboardStats;

/// Accent colour of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Blue,
    Green,
    Amber,
    Red,
    Purple,
    Teal,
}

impl Tone {
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Blue => "tone-blue",
            Self::Green => "tone-green",
            Self::Amber => "tone-amber",
            Self::Red => "tone-red",
            Self::Purple => "tone-purple",
            Self::Teal => "tone-teal",
        }
    }
}

/// A single pre-formatted figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub icon: &'static str,
    pub tone: Tone,
}

impl StatCard {
    /// Number of cards shown in the headline row.
    pub const HEADLINE: usize = 4;

    const fn new(label: &'static str, value: String, icon: &'static str, tone: Tone) -> Self {
        Self {
            label,
            value,
            icon,
            tone,
        }
    }

    /// The six dashboard cards, headline cards first.
    #[must_use]
    pub fn dashboard(stats: &DashboardStats) -> Vec<Self> {
        vec![
            Self::new("Total Clients", count(stats.total_clients), "👥", Tone::Blue),
            Self::new("Commandes Actives", count(stats.active_orders), "📋", Tone::Green),
            Self::new(
                "Revenus Mensuels",
                format_currency(stats.monthly_revenue),
                "💰",
                Tone::Purple,
            ),
            Self::new(
                "Paiements en Attente",
                format_currency(stats.pending_payments),
                "⏳",
                Tone::Amber,
            ),
            Self::new("Total Impressions", count(stats.total_impressions), "👁", Tone::Teal),
            Self::new("Total Clics", count(stats.total_clicks), "🖱", Tone::Red),
        ]
    }
}

fn count(value: u64) -> String {
    format_number(i64::try_from(value).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use lca_tv_core::Money;

    use super::*;

    #[test]
    fn test_dashboard_cards_order_and_format() {
        let stats = DashboardStats {
            total_clients: 42,
            active_orders: 7,
            monthly_revenue: Money::from_francs(1_500_000),
            total_impressions: 125_000,
            total_clicks: 3_400,
            pending_payments: Money::from_francs(250_000),
        };
        let cards = StatCard::dashboard(&stats);

        let labels: Vec<&str> = cards.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            [
                "Total Clients",
                "Commandes Actives",
                "Revenus Mensuels",
                "Paiements en Attente",
                "Total Impressions",
                "Total Clics"
            ]
        );
        assert_eq!(cards[2].value, format_currency(Money::from_francs(1_500_000)));
        assert_eq!(cards[4].value, format_number(125_000));
    }
}
