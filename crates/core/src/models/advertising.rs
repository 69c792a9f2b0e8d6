//! Advertising request, contact and public ad-serving DTOs.

use serde::{Deserialize, Serialize};

use crate::types::{AdOrderId, ContentType, Money, UnknownVariant};

/// Advertising formats offered to prospects on the viewer app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdPackage {
    Video,
    Banner,
    Sponsorship,
    Breaking,
}

impl AdPackage {
    /// Every package, in display order.
    pub const ALL: &'static [Self] = &[Self::Video, Self::Banner, Self::Sponsorship, Self::Breaking];

    /// Form value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Banner => "banner",
            Self::Sponsorship => "sponsorship",
            Self::Breaking => "breaking",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Video => "Spot Vidéo",
            Self::Banner => "Bannière TV",
            Self::Sponsorship => "Parrainage",
            Self::Breaking => "Breaking News",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Video => "30-60 secondes",
            Self::Banner => "Affichage fixe",
            Self::Sponsorship => "Émission sponsorisée",
            Self::Breaking => "Bandeau d'actualité",
        }
    }

    /// Starting price of the package.
    #[must_use]
    pub fn price(&self) -> Money {
        Money::from_francs(match self {
            Self::Video => 500_000,
            Self::Banner => 200_000,
            Self::Sponsorship => 1_000_000,
            Self::Breaking => 300_000,
        })
    }
}

impl std::fmt::Display for AdPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdPackage {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "ad package",
                value: s.to_owned(),
            })
    }
}

/// Body of `POST /advertisements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisementRequest {
    pub title: String,
    pub description: String,
    pub duration_days: u32,
    pub budget: Money,
    pub target_audience: String,
    pub ad_type: AdPackage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
}

/// A viewer's message from the contact screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// An ad currently running in a placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAd {
    pub id: AdOrderId,
    pub content_type: ContentType,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub content_html: Option<String>,
    /// Name of the ad space serving it.
    pub ad_space: String,
}

/// Response of `GET /public/ads/{position}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PublicAds {
    #[serde(default)]
    pub ads: Vec<PublicAd>,
}

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_package_catalogue() {
        assert_eq!(AdPackage::ALL.len(), 4);
        assert_eq!(AdPackage::Sponsorship.price().to_string(), "1 000 000 FCFA");
        assert_eq!("Banner".parse::<AdPackage>().unwrap(), AdPackage::Banner);
        assert!("radio".parse::<AdPackage>().is_err());
    }

    #[test]
    fn test_request_serializes_package_as_wire_value() {
        let request = AdvertisementRequest {
            title: "Brakina - Saison sèche".to_string(),
            description: "Campagne de fin d'année".to_string(),
            duration_days: 30,
            budget: Money::from_francs(500_000),
            target_audience: "Adultes 25-45".to_string(),
            ad_type: AdPackage::Video,
            content_url: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["ad_type"], "video");
        assert!(json.get("content_url").is_none());
    }

    #[test]
    fn test_public_ads_from_backend_json() {
        let json = r#"{"ads": [{"id": "o1", "content_type": "image",
            "content_url": "https://cdn.lcatv.bf/b.png", "content_html": null,
            "ad_space": "Bannière accueil"}]}"#;
        let ads: PublicAds = serde_json::from_str(json).unwrap();
        assert_eq!(ads.ads[0].content_type, ContentType::Image);
        assert!(ads.ads[0].content_html.is_none());
    }
}
