//! `/admin/ad-orders` endpoints.

use lca_tv_core::AdOrderId;
use lca_tv_core::models::{AdOrder, MessageResponse, NewAdOrder, OrderStatusUpdate};
use tracing::instrument;

use crate::error::Result;

endpoint_family!(
    /// Ad orders and their status transitions.
    OrdersApi
);

impl OrdersApi<'_> {
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<AdOrder>> {
        self.client.get("/admin/ad-orders").await
    }

    /// The backend computes duration and amount from the ad space's rates.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the client/space is unknown.
    #[instrument(skip(self, order), fields(client = %order.client_id, space = %order.ad_space_id))]
    pub async fn create(&self, order: &NewAdOrder) -> Result<AdOrder> {
        self.client.post("/admin/ad-orders", order).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &AdOrderId,
        update: &OrderStatusUpdate,
    ) -> Result<MessageResponse> {
        self.client
            .put(&format!("/admin/ad-orders/{id}/status"), update)
            .await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &AdOrderId) -> Result<()> {
        self.client.delete(&format!("/admin/ad-orders/{id}")).await
    }
}
