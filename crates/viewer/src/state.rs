//! Application state shared across handlers.

use std::sync::Arc;

use lca_tv_client::{ApiClient, Result, SessionContext};

use crate::config::ViewerConfig;
use crate::content::{BackendSource, ContentSource, FallbackSource, PlaceholderSource};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ViewerConfig,
    api: ApiClient,
    content: Arc<dyn ContentSource>,
    feed: Arc<dyn ContentSource>,
}

impl AppState {
    /// Wire the content sources from the configuration: placeholder only
    /// when offline, otherwise the backend with per-call fallback.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: ViewerConfig) -> Result<Self> {
        // Unauthenticated base client; handlers bind a per-request session.
        let api = ApiClient::new(&config.api, SessionContext::in_memory())?;
        let placeholder = PlaceholderSource::new(config.live_video_id.clone());

        let (content, feed): (Arc<dyn ContentSource>, Arc<dyn ContentSource>) = if config.offline
        {
            let placeholder: Arc<dyn ContentSource> = Arc::new(placeholder);
            (Arc::clone(&placeholder), placeholder)
        } else {
            let backend: Arc<dyn ContentSource> = Arc::new(BackendSource::new(api.clone()));
            (
                Arc::new(FallbackSource::new(Arc::clone(&backend), placeholder)),
                backend,
            )
        };

        Ok(Self::with_sources(config, api, content, feed))
    }

    /// State over explicit content sources.
    #[must_use]
    pub fn with_sources(
        config: ViewerConfig,
        api: ApiClient,
        content: Arc<dyn ContentSource>,
        feed: Arc<dyn ContentSource>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                content,
                feed,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Content for the screens; never fails while online.
    #[must_use]
    pub fn content(&self) -> &dyn ContentSource {
        self.inner.content.as_ref()
    }

    /// Unpadded news feed for the ticker, whose own fallback applies on
    /// failure.
    #[must_use]
    pub fn feed(&self) -> &dyn ContentSource {
        self.inner.feed.as_ref()
    }
}
