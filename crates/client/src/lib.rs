//! LCA TV backend client.
//!
//! Everything the dashboard, the viewer app and the CLI need to talk to the
//! LCA TV REST backend:
//!
//! - [`ApiClient`] - typed wrappers per endpoint family, with a single
//!   response interceptor that turns any HTTP 401 into a session expiry
//! - [`SessionContext`] - the explicit session object (token + user) with
//!   pluggable persistence and a subscription point for expiry events
//! - [`QueryClient`] / [`QueryWatch`] - read cache (5 minute TTL), retry
//!   policy and the 30 second background refresh for dashboard stats
//!
//! # Example
//!
//! ```rust,ignore
//! use lca_tv_client::{ApiClient, ClientConfig, SessionContext};
//!
//! let session = SessionContext::in_memory();
//! let client = ApiClient::new(&ClientConfig::from_env()?, session.clone())?;
//!
//! client.auth().login(&credentials).await?;
//! let stats = client.dashboard().stats().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, Result};
pub use http::ApiClient;
pub use query::{QueryClient, QueryKey, QueryWatch, RetryPolicy, WatchState};
pub use session::{
    Credentials, FileSessionStore, MemorySessionStore, SessionContext, SessionEvent, SessionStore,
    SessionStoreError, SessionUser,
};
#[cfg(feature = "tower-sessions")]
pub use session::TowerSessionStore;
