//! Comment thread under a video: listing, posting, likes.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use lca_tv_integration_tests::{MockBackend, TestApp, browser, video_comment};
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

const THREAD: &str = "/videos/zjWu0nZyBCY/comments";

#[tokio::test]
async fn test_detail_page_lists_backend_comments() {
    let backend = MockBackend::start().await;
    backend
        .get_ok(THREAD, json!([video_comment("c-1", "Bravo à la rédaction", 3)]))
        .await;
    let app = TestApp::viewer(&backend).await;

    let response = browser()
        .get(app.url("/emissions/zjWu0nZyBCY"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();

    assert!(html.contains("Commentaires (1)"));
    assert!(html.contains("Bravo à la rédaction"));
    assert!(html.contains("Il y a 2h"));
    assert!(html.contains(r#"hx-post="/comments/c-1/like""#));
    assert!(html.contains("👍 3"));

    let sent = backend.requests_to(&Method::GET, THREAD).await;
    assert_eq!(sent[0].query.as_deref(), Some("limit=50"));
}

#[tokio::test]
async fn test_anonymous_comment_is_posted_and_thread_refreshed() {
    let backend = MockBackend::start().await;
    backend
        .respond(
            Method::POST,
            THREAD,
            StatusCode::OK,
            json!({
                "message": "Commentaire ajouté avec succès",
                "comment": video_comment("c-2", "Très bon journal", 0),
            }),
        )
        .await;
    backend
        .get_ok(THREAD, json!([video_comment("c-2", "Très bon journal", 0)]))
        .await;
    let app = TestApp::viewer(&backend).await;

    let response = browser()
        .post(app.url("/emissions/zjWu0nZyBCY/comments"))
        .form(&[("content", "Très bon journal"), ("user_name", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(!html.contains("<html"));
    assert!(html.contains("Commentaires (1)"));

    let sent = backend.requests_to(&Method::POST, THREAD).await;
    assert_eq!(sent.len(), 1);
    let body: Value = serde_json::from_str(&sent[0].body).unwrap();
    assert_eq!(body["video_id"], "zjWu0nZyBCY");
    assert_eq!(body["content"], "Très bon journal");
    assert_eq!(body["user_name"], "Téléspectateur LCA TV");
    assert!(body.get("user_email").is_none());
}

#[tokio::test]
async fn test_signed_in_viewer_comments_under_own_name() {
    let backend = MockBackend::start().await;
    backend.accept_viewer_login().await;
    backend
        .respond(
            Method::POST,
            THREAD,
            StatusCode::OK,
            json!({ "comment": video_comment("c-3", "Merci", 0) }),
        )
        .await;
    let app = TestApp::viewer(&backend).await;
    let client = browser();

    client
        .post(app.url("/auth/login"))
        .form(&[("username", "ibrahim"), ("password", "secret")])
        .send()
        .await
        .unwrap();
    let response = client
        .post(app.url("/emissions/zjWu0nZyBCY/comments"))
        .form(&[("content", "Merci")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sent = backend.requests_to(&Method::POST, THREAD).await;
    let body: Value = serde_json::from_str(&sent[0].body).unwrap();
    assert_eq!(body["user_name"], "Ibrahim Sawadogo");
    assert_eq!(body["user_email"], "ibrahim@example.bf");
}

#[tokio::test]
async fn test_oversized_comment_never_reaches_backend() {
    let backend = MockBackend::start().await;
    let app = TestApp::viewer(&backend).await;

    let long = "a".repeat(501);
    let response = browser()
        .post(app.url("/emissions/zjWu0nZyBCY/comments"))
        .form(&[("content", long.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().await.unwrap().contains("500 caractères"));
    assert!(backend.requests_to(&Method::POST, THREAD).await.is_empty());
}

#[tokio::test]
async fn test_failed_post_keeps_the_draft() {
    let backend = MockBackend::start().await;
    backend
        .respond(
            Method::POST,
            THREAD,
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "detail": "Erreur lors de l'ajout du commentaire" }),
        )
        .await;
    let app = TestApp::viewer(&backend).await;

    let response = browser()
        .post(app.url("/emissions/zjWu0nZyBCY/comments"))
        .form(&[("content", "Mon brouillon"), ("user_name", "Awa")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = response.text().await.unwrap();
    assert!(html.contains("Impossible de publier le commentaire"));
    assert!(html.contains("Mon brouillon"));
}

#[tokio::test]
async fn test_like_swaps_in_new_count() {
    let backend = MockBackend::start().await;
    backend
        .respond(
            Method::PUT,
            "/comments/c-1/like",
            StatusCode::OK,
            json!({ "message": "Like ajouté", "likes": 4 }),
        )
        .await;
    let app = TestApp::viewer(&backend).await;
    let client = browser();

    let response = client
        .post(app.url("/comments/c-1/like"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("👍 4"));
    assert!(!html.contains("<html"));

    let response = client
        .post(app.url("/comments/gone/like"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
