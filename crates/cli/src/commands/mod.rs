//! Command implementations.

pub mod auth;
pub mod listings;
pub mod stats;
pub mod ticker;

use std::sync::Arc;

use lca_tv_client::{ApiClient, ClientConfig, FileSessionStore, SessionContext};

use crate::error::CliError;
use crate::output::print_pairs;

/// Backend client bound to the on-disk session.
pub struct Context {
    pub config: ClientConfig,
    pub session: SessionContext,
    pub api: ApiClient,
}

impl Context {
    /// Load `LCA_API_URL` and restore the session file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the session file
    /// cannot be read.
    pub async fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let store = FileSessionStore::from_env()?;
        tracing::debug!(path = %store.path().display(), "Using session file");
        let session = SessionContext::restore(Arc::new(store)).await?;
        Self::new(config, session)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, session: SessionContext) -> Result<Self, CliError> {
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Fail early when no one is signed in.
    ///
    /// # Errors
    ///
    /// Returns `CliError::NotLoggedIn` without a stored token.
    pub async fn require_login(&self) -> Result<(), CliError> {
        if self.api.auth().has_token().await {
            Ok(())
        } else {
            Err(CliError::NotLoggedIn)
        }
    }

    /// A client without the stored token, for public endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn public_api(&self) -> Result<ApiClient, CliError> {
        Ok(ApiClient::new(&self.config, SessionContext::in_memory())?)
    }
}

/// Backend health.
///
/// # Errors
///
/// Returns an error if the backend is unreachable.
pub async fn health(ctx: &Context) -> Result<(), CliError> {
    let status = ctx.public_api()?.health().await?;
    print_pairs(&[
        ("Backend", ctx.config.base_url.to_string()),
        ("Statut", status.status.clone()),
        ("Version", status.version.clone().unwrap_or_else(|| "-".to_string())),
    ])?;
    if !status.is_healthy() {
        tracing::warn!(status = %status.status, "Backend reports a degraded state");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lca_tv_client::FileSessionStore;

    use super::*;

    #[tokio::test]
    async fn test_missing_session_file_means_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        let session = SessionContext::restore(Arc::new(store)).await.unwrap();
        let config = ClientConfig::new("http://127.0.0.1:9/api").unwrap();
        let ctx = Context::new(config, session).unwrap();

        assert!(matches!(ctx.require_login().await, Err(CliError::NotLoggedIn)));
    }
}
