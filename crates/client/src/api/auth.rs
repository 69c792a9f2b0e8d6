//! `/auth` endpoints.
//!
//! The backend's `/auth/login` may answer with the token alone; the user is
//! then resolved through `/auth/me` before the session is written, so a
//! session never holds a token without its user.

use lca_tv_core::models::{AdminUser, AuthResponse, LoginCredentials, Registration, Token};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::Result;
use crate::session::SessionUser;

endpoint_family!(
    /// Login, registration and the current user.
    AuthApi
);

/// `/auth/login` reply; `user` is only present on the dashboard backend.
#[derive(Deserialize)]
struct LoginReply {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    user: Option<AdminUser>,
}

impl AuthApi<'_> {
    /// Dashboard login. Stores the token and operator in the session.
    ///
    /// Any account the backend authenticates is an operator; a role is
    /// recorded only when the backend sends one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for bad credentials.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        let reply: LoginReply = self.client.post("/auth/login", credentials).await?;
        let user = match reply.user {
            Some(user) => user,
            None => self.me_as(&reply.access_token).await?.into_operator(),
        };

        self.client
            .session()
            .login(reply.access_token.clone(), SessionUser::Admin(user.clone()))
            .await?;
        info!(user = %user.username, "Admin logged in");

        Ok(AuthResponse {
            access_token: reply.access_token,
            token_type: reply.token_type.unwrap_or_else(|| "bearer".to_string()),
            user,
        })
    }

    /// Viewer login through the same endpoint; the user record is whatever
    /// `/auth/me` returns.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for bad credentials.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn viewer_login(&self, credentials: &LoginCredentials) -> Result<SessionUser> {
        let reply: LoginReply = self.client.post("/auth/login", credentials).await?;
        let user = match reply.user {
            Some(user) => SessionUser::Admin(user),
            None => self.me_as(&reply.access_token).await?,
        };
        self.client
            .session()
            .login(reply.access_token, user.clone())
            .await?;
        Ok(user)
    }

    /// Create a viewer account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` when the backend rejects the registration
    /// (e.g. username taken).
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> Result<SessionUser> {
        let token: Token = self.client.post("/auth/register", registration).await?;
        let user = self.me_as(&token.access_token).await?;
        self.client
            .session()
            .login(token.access_token, user.clone())
            .await?;
        info!(user = %user.username(), "Viewer registered");
        Ok(user)
    }

    /// `GET /auth/me` with the session token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when the session is missing or
    /// expired.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<SessionUser> {
        self.client.get("/auth/me").await
    }

    async fn me_as(&self, token: &str) -> Result<SessionUser> {
        self.client.get_as("/auth/me", token).await
    }

    /// Local sign-out; the backend keeps no session state.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Session` if the persisted copy cannot be removed.
    pub async fn logout(&self) -> Result<()> {
        self.client.session().clear().await?;
        Ok(())
    }

    /// Whether the session currently holds a token.
    pub async fn has_token(&self) -> bool {
        self.client
            .session()
            .token()
            .await
            .is_some_and(|t| !t.expose_secret().is_empty())
    }
}
