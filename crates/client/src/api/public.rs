//! Public ad serving. No authentication.

use lca_tv_core::AdOrderId;
use lca_tv_core::models::{MessageResponse, PublicAds};
use tracing::instrument;

use crate::error::Result;

endpoint_family!(
    /// Ads for a web placement and click tracking.
    PublicAdsApi
);

impl PublicAdsApi<'_> {
    /// Active ads for a placement such as `header` or `sidebar`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn for_position(&self, position: &str) -> Result<PublicAds> {
        self.client.get(&format!("/public/ads/{position}")).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn click(&self, order_id: &AdOrderId) -> Result<MessageResponse> {
        self.client
            .post(&format!("/public/ads/{order_id}/click"), &serde_json::json!({}))
            .await
    }
}
