//! Application state shared across handlers.

use std::sync::Arc;

use lca_tv_client::{ApiClient, QueryClient, Result, SessionContext};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: ApiClient,
    query: QueryClient,
}

impl AppState {
    /// Build the state with the default query cache.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: AdminConfig) -> Result<Self> {
        Self::with_query(config, QueryClient::default())
    }

    /// Build the state around an explicit query cache.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_query(config: AdminConfig, query: QueryClient) -> Result<Self> {
        // Unauthenticated base client; handlers bind a per-request session.
        let api = ApiClient::new(&config.api, SessionContext::in_memory())?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, api, query }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Read cache shared by every signed-in admin.
    #[must_use]
    pub fn query(&self) -> &QueryClient {
        &self.inner.query
    }
}
