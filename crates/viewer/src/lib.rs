//! LCA TV viewer app.
//!
//! Server-rendered content screens over the LCA TV backend: live stream,
//! journal, émissions, breaking news and the ticker, plus optional viewer
//! accounts for advertising requests. When the backend is unreachable the
//! screens fall back to built-in placeholder content.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use std::path::PathBuf;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;

use crate::middleware::{
    auth_rate_limiter, create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Static assets shipped with the crate.
fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// Build the application router with sessions and security headers.
///
/// Tracing and Sentry layers are added by the binary. The rate limiter keys
/// on the client IP, so the service must be served with connect info (or
/// behind a proxy that sets `x-forwarded-for`).
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest("/auth", routes::auth::router().layer(auth_rate_limiter()))
        .nest_service("/static", ServeDir::new(static_dir()))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use lca_tv_client::{ApiClient, ClientConfig, SessionContext};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ViewerConfig;
    use crate::content::{ContentSource, PlaceholderSource};

    fn offline_app() -> Router {
        let api = ClientConfig::new("http://127.0.0.1:9").unwrap();
        let config = ViewerConfig::local(api.clone());
        let placeholder: Arc<dyn ContentSource> =
            Arc::new(PlaceholderSource::new(config.live_video_id.clone()));
        let client = ApiClient::new(&api, SessionContext::in_memory()).unwrap();
        app(AppState::with_sources(
            config,
            client,
            Arc::clone(&placeholder),
            placeholder,
        ))
    }

    async fn body(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("x-forwarded-for", "196.28.245.3")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_carries_security_headers() {
        let response = offline_app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_home_renders_placeholder_content() {
        let response = offline_app().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body(response).await;
        assert!(html.contains("LCA TV - Diffusion en Direct"));
        assert!(html.contains("🔴 URGENT"));
    }

    #[tokio::test]
    async fn test_breaking_news_filters_by_priority() {
        let response = offline_app()
            .oneshot(get("/breaking-news?priority=urgent"))
            .await
            .unwrap();
        let html = body(response).await;
        assert!(html.contains("🔴 URGENT"));
        assert!(!html.contains("ℹ️ INFO"));
    }

    #[tokio::test]
    async fn test_ticker_fragment_renders_two_copies() {
        let response = offline_app().oneshot(get("/ticker")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body(response).await;
        assert!(html.contains("DIRECT"));
        assert!(html.contains("-duplicate"));
    }

    #[tokio::test]
    async fn test_emissions_htmx_request_gets_rows_only() {
        let request = Request::builder()
            .uri("/emissions")
            .header("hx-request", "true")
            .body(Body::empty())
            .unwrap();
        let response = offline_app().oneshot(request).await.unwrap();
        let html = body(response).await;
        assert!(!html.contains("<html"));
        assert!(html.contains("Dernières Émissions"));
    }

    #[tokio::test]
    async fn test_profile_shows_demo_user_when_signed_out() {
        let response = offline_app().oneshot(get("/profile")).await.unwrap();
        let html = body(response).await;
        assert!(html.contains("Utilisateur Demo"));
        assert!(html.contains("Version 1.0.0"));
    }

    #[tokio::test]
    async fn test_empty_contact_form_is_rejected_inline() {
        let response = offline_app()
            .oneshot(form("/contact", "name=&email=&subject=&message="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body(response).await;
        assert!(html.contains("Veuillez remplir tous les champs"));
    }

    #[tokio::test]
    async fn test_valid_contact_form_redirects_back() {
        let response = offline_app()
            .oneshot(form(
                "/contact",
                "name=Awa&email=awa%40example.bf&subject=Programme&message=Bonjour",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/contact");
    }

    #[tokio::test]
    async fn test_advertising_request_needs_sign_in() {
        let response = offline_app()
            .oneshot(form(
                "/advertising/create",
                "company_name=Faso+Cola&contact_name=Issa&email=issa%40fasocola.bf&ad_type=video",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let html = body(response).await;
        assert!(html.contains("Connectez-vous"));
    }

    #[tokio::test]
    async fn test_empty_registration_lists_missing_fields() {
        let response = offline_app()
            .oneshot(form("/auth/register", "username=&email=&password=&confirm_password=&full_name="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body(response).await;
        assert!(html.contains("Veuillez remplir tous les champs"));
    }

    #[tokio::test]
    async fn test_settings_save_redirects() {
        let response = offline_app()
            .oneshot(form("/settings", "dark_mode=on&autoplay=on"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/settings");
    }

    #[tokio::test]
    async fn test_video_detail_shows_empty_comment_thread() {
        let response = offline_app().oneshot(get("/emissions/zjWu0nZyBCY")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body(response).await;
        assert!(html.contains("Journal LCA TV - Édition du Soir"));
        assert!(html.contains("Commentaires (0)"));
        assert!(html.contains("Soyez le premier à commenter !"));
        assert!(html.contains(r#"hx-post="/emissions/zjWu0nZyBCY/comments""#));
    }

    #[tokio::test]
    async fn test_blank_comment_is_rejected_without_backend_call() {
        let response = offline_app()
            .oneshot(form("/emissions/zjWu0nZyBCY/comments", "content=++&user_name="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body(response).await;
        assert!(!html.contains("<html"));
        assert!(html.contains("Ce champ est requis"));
    }

    #[tokio::test]
    async fn test_offline_mode_refuses_comment_writes() {
        let api = ClientConfig::new("http://127.0.0.1:9").unwrap();
        let mut config = ViewerConfig::local(api);
        config.offline = true;
        let app = app(AppState::new(config).unwrap());

        let response = app
            .clone()
            .oneshot(form("/emissions/zjWu0nZyBCY/comments", "content=Bravo"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(body(response).await.contains("indisponibles hors ligne"));

        let response = app.oneshot(form("/comments/c-1/like", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
