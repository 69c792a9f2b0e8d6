//! Dashboard login, authenticated reads, and session expiry.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use lca_tv_integration_tests::{
    ADMIN_TOKEN, MockBackend, TestApp, VIEWER_TOKEN, browser, dashboard_stats, location,
    revenue_analytics,
};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

const LOGIN_FORM: [(&str, &str); 2] = [("username", "admin"), ("password", "secret")];

/// Backend with a working login and dashboard data.
async fn dashboard_backend() -> MockBackend {
    let backend = MockBackend::start().await;
    backend.accept_admin_login().await;
    backend.get_ok("/admin/dashboard/stats", dashboard_stats()).await;
    backend.get_ok("/admin/analytics/revenue", revenue_analytics()).await;
    backend
}

async fn sign_in(app: &TestApp, client: &reqwest::Client) {
    let response = client
        .post(app.url("/login"))
        .form(&LOGIN_FORM)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));
}

#[tokio::test]
async fn test_login_then_dashboard_sends_bearer_token() {
    let backend = dashboard_backend().await;
    let app = TestApp::admin(&backend).await;
    let client = browser();

    sign_in(&app, &client).await;
    let response = client.get(app.url("/dashboard")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();

    assert!(html.contains("Connexion réussie !"));
    assert!(html.contains("Total Clients"));
    assert!(html.contains("1 500 000 FCFA"));
    assert!(html.contains("Aminata Ouédraogo"));

    let login = backend.requests_to(&Method::POST, "/auth/login").await;
    assert_eq!(login.len(), 1);
    assert!(login[0].body.contains(r#""username":"admin""#));
    assert_eq!(login[0].bearer(), None);

    let stats = backend.requests_to(&Method::GET, "/admin/dashboard/stats").await;
    assert!(!stats.is_empty());
    assert!(stats.iter().all(|r| r.bearer() == Some(ADMIN_TOKEN)));
}

#[tokio::test]
async fn test_dashboard_requires_login() {
    let backend = MockBackend::start().await;
    let app = TestApp::admin(&backend).await;

    let response = browser().get(app.url("/dashboard")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert!(backend.requests().await.is_empty());
}

#[tokio::test]
async fn test_expired_token_redirects_to_login_and_drops_session() {
    let backend = dashboard_backend().await;
    let app = TestApp::admin(&backend).await;
    let client = browser();
    sign_in(&app, &client).await;

    backend.unauthorized(Method::GET, "/admin/dashboard/stats").await;
    let response = client.get(app.url("/dashboard")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    // The session is gone: the next page is refused without a backend call.
    backend.clear_requests().await;
    let response = client.get(app.url("/dashboard/clients")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert!(backend.requests().await.is_empty());
}

#[tokio::test]
async fn test_htmx_poll_gets_hx_redirect_on_expiry() {
    let backend = dashboard_backend().await;
    let app = TestApp::admin(&backend).await;
    let client = browser();
    sign_in(&app, &client).await;

    backend.unauthorized(Method::GET, "/admin/dashboard/stats").await;
    let mut headers = HeaderMap::new();
    headers.insert("HX-Request", "true".parse().unwrap());
    let response = client
        .get(app.url("/dashboard/stats"))
        .headers(headers)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("HX-Redirect").and_then(|v| v.to_str().ok()),
        Some("/login")
    );
}

#[tokio::test]
async fn test_bad_credentials_stay_on_login_page() {
    let backend = MockBackend::start().await;
    backend.unauthorized(Method::POST, "/auth/login").await;
    let app = TestApp::admin(&backend).await;

    let response = browser()
        .post(app.url("/login"))
        .form(&LOGIN_FORM)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.text().await.unwrap().contains("mot de passe incorrect"));
}

#[tokio::test]
async fn test_token_only_login_with_role_less_account_reaches_dashboard() {
    let backend = MockBackend::start().await;
    backend.accept_viewer_login().await;
    backend.get_ok("/admin/dashboard/stats", dashboard_stats()).await;
    backend.get_ok("/admin/analytics/revenue", revenue_analytics()).await;
    let app = TestApp::admin(&backend).await;
    let client = browser();

    let response = client
        .post(app.url("/login"))
        .form(&[("username", "ibrahim"), ("password", "secret")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));

    let response = client.get(app.url("/dashboard")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("Ibrahim Sawadogo"));
    assert!(html.contains("Opérateur"));

    let me = backend.requests_to(&Method::GET, "/auth/me").await;
    assert_eq!(me.len(), 1);
    assert_eq!(me[0].bearer(), Some(VIEWER_TOKEN));
    let stats = backend.requests_to(&Method::GET, "/admin/dashboard/stats").await;
    assert!(stats.iter().all(|r| r.bearer() == Some(VIEWER_TOKEN)));
}

#[tokio::test]
async fn test_blank_login_form_never_reaches_backend() {
    let backend = MockBackend::start().await;
    let app = TestApp::admin(&backend).await;

    let response = browser()
        .post(app.url("/login"))
        .form(&[("username", " "), ("password", "")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(backend.requests().await.is_empty());
}
