//! Order cost estimates and invoice previews.
//!
//! The backend is authoritative for amounts; these figures are shown on the
//! order form before submission and must match the backend's tiers.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::models::AdSpace;
use crate::types::{AdOrderId, Money};

/// Orders up to this many days are billed at the day rate.
pub const DAILY_TIER_MAX_DAYS: i64 = 7;
/// Orders up to this many days are billed at the week rate.
pub const WEEKLY_TIER_MAX_DAYS: i64 = 30;
/// Invoices fall due this many days after issue.
pub const PAYMENT_TERM_DAYS: i64 = 30;

/// VAT applied to invoices (18%).
#[must_use]
pub fn vat_rate() -> Decimal {
    Decimal::new(18, 2)
}

/// Which rate an order duration is billed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingTier {
    Daily,
    Weekly,
    Monthly,
}

impl PricingTier {
    /// Tier for a duration in days.
    #[must_use]
    pub const fn for_days(days: i64) -> Self {
        if days <= DAILY_TIER_MAX_DAYS {
            Self::Daily
        } else if days <= WEEKLY_TIER_MAX_DAYS {
            Self::Weekly
        } else {
            Self::Monthly
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Tarif journalier",
            Self::Weekly => "Tarif hebdomadaire",
            Self::Monthly => "Tarif mensuel",
        }
    }
}

/// Estimated cost of running `space` for `days` days.
///
/// Non-positive durations cost nothing.
#[must_use]
pub fn estimate(space: &AdSpace, days: i64) -> Money {
    if days <= 0 {
        return Money::ZERO;
    }
    let tier = PricingTier::for_days(days);
    let days = Decimal::from(days);
    match tier {
        PricingTier::Daily => space.price_per_day * days,
        PricingTier::Weekly => space.price_per_week * (days / Decimal::from(7)),
        PricingTier::Monthly => space.price_per_month * (days / Decimal::from(30)),
    }
}

/// Estimated cost for a date range, using whole days between the dates.
#[must_use]
pub fn estimate_range(space: &AdSpace, start: DateTime<Utc>, end: DateTime<Utc>) -> Money {
    estimate(space, (end - start).num_days())
}

/// What the backend will invoice once an order is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePreview {
    pub invoice_number: String,
    pub amount: Money,
    pub tax_amount: Money,
    pub total_amount: Money,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl InvoicePreview {
    /// Build the preview for an order amount issued at `issued`.
    #[must_use]
    pub fn new(order_id: &AdOrderId, amount: Money, issued: DateTime<Utc>) -> Self {
        let tax_amount = Money::new((amount * vat_rate()).rounded());
        Self {
            invoice_number: invoice_number(order_id, issued),
            amount,
            tax_amount,
            total_amount: amount + tax_amount,
            issue_date: issued,
            due_date: issued + Duration::days(PAYMENT_TERM_DAYS),
        }
    }
}

/// Invoice number in the `INV-YYYYMMDD-{order id}` scheme.
#[must_use]
pub fn invoice_number(order_id: &AdOrderId, issued: DateTime<Utc>) -> String {
    format!("INV-{}-{}", issued.format("%Y%m%d"), order_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Dimensions;
    use crate::types::AdSpaceId;

    fn space() -> AdSpace {
        AdSpace {
            id: AdSpaceId::new("s1"),
            name: "Bannière accueil".to_string(),
            position: "header".to_string(),
            dimensions: Dimensions {
                width: 728,
                height: 90,
            },
            price_per_day: Money::from_francs(25_000),
            price_per_week: Money::from_francs(140_000),
            price_per_month: Money::from_francs(450_000),
            is_active: true,
            created_at: None,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(PricingTier::for_days(7), PricingTier::Daily);
        assert_eq!(PricingTier::for_days(8), PricingTier::Weekly);
        assert_eq!(PricingTier::for_days(30), PricingTier::Weekly);
        assert_eq!(PricingTier::for_days(31), PricingTier::Monthly);
    }

    #[test]
    fn test_estimate_per_tier() {
        let space = space();
        assert_eq!(estimate(&space, 5), Money::from_francs(125_000));
        assert_eq!(estimate(&space, 14), Money::from_francs(280_000));
        assert_eq!(estimate(&space, 60), Money::from_francs(900_000));
        assert_eq!(estimate(&space, 0), Money::ZERO);
        assert_eq!(estimate(&space, -3), Money::ZERO);
    }

    #[test]
    fn test_estimate_range() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 4, 0, 0, 0).unwrap();
        assert_eq!(estimate_range(&space(), start, end), Money::from_francs(75_000));
    }

    #[test]
    fn test_invoice_preview() {
        let issued = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let preview = InvoicePreview::new(&AdOrderId::new("665f"), Money::from_francs(100_000), issued);
        assert_eq!(preview.invoice_number, "INV-20240501-665f");
        assert_eq!(preview.tax_amount.amount(), dec!(18000));
        assert_eq!(preview.total_amount, Money::from_francs(118_000));
        assert_eq!(preview.due_date, Utc.with_ymd_and_hms(2024, 5, 31, 9, 0, 0).unwrap());
    }
}
