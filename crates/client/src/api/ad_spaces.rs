//! `/admin/ad-spaces` endpoints.

use lca_tv_core::AdSpaceId;
use lca_tv_core::models::{AdSpace, NewAdSpace};
use tracing::instrument;

use crate::error::Result;

endpoint_family!(
    /// Sellable placements.
    AdSpacesApi
);

impl AdSpacesApi<'_> {
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<AdSpace>> {
        self.client.get("/admin/ad-spaces").await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, space), fields(name = %space.name))]
    pub async fn create(&self, space: &NewAdSpace) -> Result<AdSpace> {
        self.client.post("/admin/ad-spaces", space).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, space))]
    pub async fn update(&self, id: &AdSpaceId, space: &NewAdSpace) -> Result<AdSpace> {
        self.client.put(&format!("/admin/ad-spaces/{id}"), space).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &AdSpaceId) -> Result<()> {
        self.client.delete(&format!("/admin/ad-spaces/{id}")).await
    }
}
