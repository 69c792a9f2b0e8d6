//! LCA TV advertising dashboard.
//!
//! Server-rendered admin panel over the LCA TV backend: clients, ad spaces,
//! orders, analytics and admin accounts. The dashboard holds no data of its
//! own; every read and write goes through [`lca_tv_client`] with the signed-in
//! admin's bearer token, kept in the cookie session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use std::path::PathBuf;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;

use crate::middleware::{create_session_layer, redirect_on_expiry};
use crate::state::AppState;

/// Static assets shipped with the crate.
fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// Build the application router with sessions and expiry handling.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir()))
        .layer(from_fn(redirect_on_expiry))
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the backend does not answer.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.api().health().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Backend health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
