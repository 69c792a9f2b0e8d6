//! Advertising order and invoice DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::format::percentage;
use crate::types::{
    AdOrderId, AdSpaceId, ClientId, ContentType, InvoiceId, Money, OrderStatus, PaymentStatus,
};

/// A purchased run of an ad space by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdOrder {
    pub id: AdOrderId,
    pub client_id: ClientId,
    pub ad_space_id: AdSpaceId,
    pub content_type: ContentType,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(with = "timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end_date: DateTime<Utc>,
    pub duration_days: i64,
    pub total_amount: Money,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(with = "timestamp::option", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
}

impl AdOrder {
    /// Click-through rate in percent, 2 decimal places.
    #[must_use]
    pub fn ctr(&self) -> f64 {
        percentage(self.clicks, self.impressions)
    }
}

/// Payload for `POST /admin/ad-orders`.
///
/// Duration and amount are computed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdOrder {
    pub client_id: ClientId,
    pub ad_space_id: AdSpaceId,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(with = "timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end_date: DateTime<Utc>,
}

impl NewAdOrder {
    /// Whole days between start and end.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Body of `PUT /admin/ad-orders/{id}/status`. Unset fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl OrderStatusUpdate {
    /// True when the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.payment_status.is_none()
    }
}

/// Invoice issued for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub order_id: AdOrderId,
    pub client_id: ClientId,
    pub invoice_number: String,
    pub amount: Money,
    #[serde(default)]
    pub tax_amount: Money,
    pub total_amount: Money,
    #[serde(with = "timestamp")]
    pub issue_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub due_date: DateTime<Utc>,
    pub status: PaymentStatus,
    #[serde(with = "timestamp::option", default)]
    pub payment_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "o1",
            "client_id": "c1",
            "ad_space_id": "s1",
            "content_type": "video",
            "content_url": "https://cdn.lcatv.bf/spot.mp4",
            "start_date": "2024-05-01T00:00:00",
            "end_date": "2024-05-15T00:00:00",
            "duration_days": 14,
            "total_amount": 300000.0,
            "status": "active",
            "payment_status": "paid",
            "created_at": "2024-04-28T10:12:00",
            "impressions": 2000,
            "clicks": 37
        }"#
    }

    #[test]
    fn test_order_from_backend_json() {
        let order: AdOrder = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(order.status, OrderStatus::Active);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.content_type, ContentType::Video);
        assert!((order.ctr() - 1.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_order_serializes_dates_as_rfc3339() {
        let order = NewAdOrder {
            client_id: ClientId::new("c1"),
            ad_space_id: AdSpaceId::new("s1"),
            content_type: ContentType::Image,
            content_url: None,
            content_html: None,
            start_date: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 5, 8, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["start_date"], "2024-05-01T00:00:00Z");
        assert!(json.get("content_url").is_none());
        assert_eq!(order.duration_days(), 7);
    }

    #[test]
    fn test_status_update_skips_unset() {
        let update = OrderStatusUpdate {
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"payment_status":"paid"}"#
        );
        assert!(OrderStatusUpdate::default().is_empty());
    }
}
