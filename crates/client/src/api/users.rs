//! `/admin/users` endpoints.

use lca_tv_core::AdminUserId;
use lca_tv_core::models::{AdminUser, AdminUserUpdate, NewAdminUser};
use tracing::instrument;

use crate::error::Result;

endpoint_family!(
    /// Dashboard operator accounts.
    UsersApi
);

impl UsersApi<'_> {
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<AdminUser>> {
        self.client.get("/admin/users").await
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the username is taken.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create(&self, user: &NewAdminUser) -> Result<AdminUser> {
        self.client.post("/admin/users", user).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: &AdminUserId, update: &AdminUserUpdate) -> Result<AdminUser> {
        self.client.put(&format!("/admin/users/{id}"), update).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &AdminUserId) -> Result<()> {
        self.client.delete(&format!("/admin/users/{id}")).await
    }

    /// Toggle an account without deleting it.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: &AdminUserId, active: bool) -> Result<AdminUser> {
        let update = AdminUserUpdate {
            is_active: Some(active),
            ..AdminUserUpdate::default()
        };
        self.update(id, &update).await
    }
}
