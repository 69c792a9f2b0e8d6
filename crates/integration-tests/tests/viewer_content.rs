//! Viewer screens against a live, failing, or unreachable backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use lca_tv_integration_tests::{
    MockBackend, TestApp, VIEWER_TOKEN, breaking_news, browser, location,
};
use reqwest::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_ticker_falls_back_when_feed_fails() {
    let backend = MockBackend::start().await;
    backend
        .respond(
            Method::GET,
            "/breaking-news",
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "detail": "Internal Server Error" }),
        )
        .await;
    let app = TestApp::viewer(&backend).await;

    let response = browser().get(app.url("/ticker")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();

    assert!(html.contains(r#"data-id="fallback-1""#));
    assert!(html.contains(r#"data-id="fallback-3-duplicate""#));
    assert!(!html.contains("fallback-4"));
    assert!(html.contains("animation: ticker-scroll 36s"));
}

#[tokio::test]
async fn test_ticker_leads_with_feed_headlines() {
    let backend = MockBackend::start().await;
    backend
        .get_ok(
            "/breaking-news",
            json!([breaking_news("Sommet de la CEDEAO à Ouagadougou")]),
        )
        .await;
    let app = TestApp::viewer(&backend).await;

    let html = browser()
        .get(app.url("/ticker"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("URGENT: Sommet de la CEDEAO à Ouagadougou"));
    assert!(html.contains(r#"data-id="market-2-duplicate""#));
    assert!(!html.contains("fallback-1"));

    let feed = backend.requests_to(&Method::GET, "/breaking-news").await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].bearer(), None);
    assert_eq!(feed[0].query.as_deref(), Some("limit=3"));
}

#[tokio::test]
async fn test_screens_render_when_backend_has_nothing() {
    let backend = MockBackend::start().await;
    let app = TestApp::viewer(&backend).await;
    let client = browser();

    for path in ["/", "/live", "/journal", "/emissions", "/breaking-news"] {
        let response = client.get(app.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_advertising_request_sent_with_viewer_token() {
    let backend = MockBackend::start().await;
    backend.accept_viewer_login().await;
    backend
        .respond(
            Method::POST,
            "/advertisements",
            StatusCode::OK,
            json!({ "message": "Advertisement request received" }),
        )
        .await;
    let app = TestApp::viewer(&backend).await;
    let client = browser();

    let response = client
        .post(app.url("/auth/login"))
        .form(&[("username", "ibrahim"), ("password", "secret")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    let response = client
        .post(app.url("/advertising/create"))
        .form(&[
            ("company_name", "Brakina"),
            ("contact_name", "Ibrahim Sawadogo"),
            ("email", "marketing@brakina.bf"),
            ("ad_type", "video"),
            ("duration", "14"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    let sent = backend.requests_to(&Method::POST, "/advertisements").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer(), Some(VIEWER_TOKEN));
    assert!(sent[0].body.contains(r#""ad_type":"video""#));
    assert!(sent[0].body.contains(r#""duration_days":14"#));
}

#[tokio::test]
async fn test_expired_viewer_token_sends_back_to_login() {
    let backend = MockBackend::start().await;
    backend.accept_viewer_login().await;
    backend.unauthorized(Method::POST, "/advertisements").await;
    let app = TestApp::viewer(&backend).await;
    let client = browser();

    client
        .post(app.url("/auth/login"))
        .form(&[("username", "ibrahim"), ("password", "secret")])
        .send()
        .await
        .unwrap();

    let response = client
        .post(app.url("/advertising/create"))
        .form(&[
            ("company_name", "Brakina"),
            ("contact_name", "Ibrahim Sawadogo"),
            ("email", "marketing@brakina.bf"),
            ("ad_type", "banner"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));

    // Signed out now: a second request is refused locally.
    backend.clear_requests().await;
    let response = client
        .post(app.url("/advertising/create"))
        .form(&[
            ("company_name", "Brakina"),
            ("contact_name", "Ibrahim Sawadogo"),
            ("email", "marketing@brakina.bf"),
            ("ad_type", "banner"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(backend.requests().await.is_empty());
}
