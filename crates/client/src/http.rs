//! HTTP transport for the LCA TV backend.
//!
//! [`ApiClient`] owns the `reqwest` client, attaches the bearer token from
//! the [`SessionContext`] and funnels every response through one
//! interceptor: HTTP 401 expires the session (credentials cleared,
//! [`crate::SessionEvent::Expired`] published) before the error reaches the
//! caller, whichever endpoint triggered it.

use std::sync::Arc;

use lca_tv_core::models::HealthStatus;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::api::{
    AdSpacesApi, AdvertisingApi, AuthApi, ClientsApi, ContentApi, DashboardApi, OrdersApi,
    PublicAdsApi, UsersApi,
};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result, extract_detail};
use crate::session::SessionContext;

/// Typed client for the LCA TV backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
    session: SessionContext,
}

struct ApiClientInner {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client bound to `session`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, session: SessionContext) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("lca-tv-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                config: config.clone(),
            }),
            session,
        })
    }

    /// Same connection pool, different session. Used per request by the
    /// web apps, where each browser has its own credential.
    #[must_use]
    pub fn with_session(&self, session: SessionContext) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            session,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    // =========================================================================
    // Endpoint families
    // =========================================================================

    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    #[must_use]
    pub const fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    #[must_use]
    pub const fn clients(&self) -> ClientsApi<'_> {
        ClientsApi::new(self)
    }

    #[must_use]
    pub const fn ad_spaces(&self) -> AdSpacesApi<'_> {
        AdSpacesApi::new(self)
    }

    #[must_use]
    pub const fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(self)
    }

    #[must_use]
    pub const fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    #[must_use]
    pub const fn public_ads(&self) -> PublicAdsApi<'_> {
        PublicAdsApi::new(self)
    }

    #[must_use]
    pub const fn content(&self) -> ContentApi<'_> {
        ContentApi::new(self)
    }

    #[must_use]
    pub const fn advertising(&self) -> AdvertisingApi<'_> {
        AdvertisingApi::new(self)
    }

    /// `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns error if the backend is unreachable or unhealthy.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get("/health").await
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::json(response).await
    }

    /// GET with an explicit bearer token instead of the session's. Used
    /// right after login, before the session has been written.
    pub(crate) async fn get_as<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T> {
        let response = self
            .dispatch(self.request(Method::GET, path).bearer_auth(token))
            .await?;
        Self::json(response).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        Self::json(response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::json(response).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::json(response).await
    }

    /// PUT without a body, for action endpoints such as likes.
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::PUT, path)).await?;
        Self::json(response).await
    }

    /// DELETE, discarding whatever acknowledgement the backend sends.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner
            .http
            .request(method, self.inner.config.endpoint(path))
    }

    /// Attach the session's bearer token and dispatch.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let builder = match self.session.token().await {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        };
        self.dispatch(builder).await
    }

    /// Send and apply the response interceptor.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(status = %status, url = %response.url().path(), "Backend response");

        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .map(|body| extract_detail(&body))
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Backend returned 401, expiring session");
                self.session.expire().await;
                Err(ApiError::Unauthorized(message))
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(message)),
            _ => Err(ApiError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body = %body.chars().take(300).collect::<String>(),
                "Failed to parse backend response"
            );
            ApiError::Parse(e.to_string())
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .finish_non_exhaustive()
    }
}
