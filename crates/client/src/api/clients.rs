//! `/admin/clients` endpoints.

use lca_tv_core::ClientId;
use lca_tv_core::models::{Client, NewClient};
use tracing::instrument;

use crate::error::Result;

endpoint_family!(
    /// Advertiser accounts.
    ClientsApi
);

impl ClientsApi<'_> {
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Client>> {
        self.client.get("/admin/clients").await
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &ClientId) -> Result<Client> {
        self.client.get(&format!("/admin/clients/{id}")).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, client), fields(company = %client.company_name))]
    pub async fn create(&self, client: &NewClient) -> Result<Client> {
        self.client.post("/admin/clients", client).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, client))]
    pub async fn update(&self, id: &ClientId, client: &NewClient) -> Result<Client> {
        self.client.put(&format!("/admin/clients/{id}"), client).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ClientId) -> Result<()> {
        self.client.delete(&format!("/admin/clients/{id}")).await
    }
}
