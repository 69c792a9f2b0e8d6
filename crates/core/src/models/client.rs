//! Advertiser and ad space DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::types::{AdSpaceId, ClientId, Money};

const fn default_true() -> bool {
    true
}

/// An advertiser buying air time or web placements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(with = "timestamp::option", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub total_spent: Money,
}

/// Payload for creating or replacing a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Pixel size of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// A sellable placement with tiered pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSpace {
    pub id: AdSpaceId,
    pub name: String,
    /// Where the placement renders (header, sidebar, footer, banner, popup).
    pub position: String,
    pub dimensions: Dimensions,
    pub price_per_day: Money,
    pub price_per_week: Money,
    pub price_per_month: Money,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "timestamp::option", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating or replacing an ad space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdSpace {
    pub name: String,
    pub position: String,
    pub dimensions: Dimensions,
    pub price_per_day: Money,
    pub price_per_week: Money,
    pub price_per_month: Money,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults_for_missing_fields() {
        let json = r#"{
            "id": "c1",
            "company_name": "Brakina",
            "contact_person": "Issa Kaboré",
            "email": "pub@brakina.bf",
            "phone": "70123456"
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert!(client.is_active);
        assert_eq!(client.total_spent, Money::ZERO);
        assert!(client.address.is_none());
    }

    #[test]
    fn test_ad_space_prices_from_numbers() {
        let json = r#"{
            "id": "s1",
            "name": "Bannière accueil",
            "position": "header",
            "dimensions": {"width": 728, "height": 90},
            "price_per_day": 25000.0,
            "price_per_week": 150000,
            "price_per_month": 500000
        }"#;
        let space: AdSpace = serde_json::from_str(json).unwrap();
        assert_eq!(space.dimensions.to_string(), "728×90");
        assert_eq!(space.price_per_week, Money::from_francs(150_000));
    }
}
