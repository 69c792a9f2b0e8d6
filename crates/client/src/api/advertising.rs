//! Advertising requests submitted by viewers.

use lca_tv_core::models::{AdvertisementRequest, MessageResponse};
use tracing::instrument;

use crate::error::Result;

endpoint_family!(
    /// `POST /advertisements`.
    AdvertisingApi
);

impl AdvertisingApi<'_> {
    /// Submit an advertising request. Requires a viewer session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without a session, or error if the
    /// request fails.
    #[instrument(skip(self, request), fields(ad_type = %request.ad_type))]
    pub async fn create(&self, request: &AdvertisementRequest) -> Result<MessageResponse> {
        self.client.post("/advertisements", request).await
    }
}
