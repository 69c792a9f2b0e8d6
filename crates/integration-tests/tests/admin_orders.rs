//! Order listing, validation and creation through the dashboard.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use lca_tv_integration_tests::{ADMIN_TOKEN, MockBackend, TestApp, browser, location};
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

fn order(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "client_id": "client-1",
        "ad_space_id": "space-1",
        "content_type": "image",
        "content_url": "https://cdn.lcatv.bf/ads/banner.png",
        "start_date": "2024-12-01T00:00:00",
        "end_date": "2024-12-31T00:00:00",
        "duration_days": 30,
        "total_amount": 750_000,
        "status": status,
        "payment_status": "pending",
        "created_at": "2024-11-28T10:00:00",
        "impressions": 1_000,
        "clicks": 25,
    })
}

async fn signed_in(backend: &MockBackend) -> (TestApp, reqwest::Client) {
    backend.accept_admin_login().await;
    backend
        .get_ok(
            "/admin/clients",
            json!([{
                "id": "client-1",
                "company_name": "SONABEL",
                "contact_person": "Issa Traoré",
                "email": "pub@sonabel.bf",
                "phone": "+22670123456",
                "is_active": true,
                "total_spent": 750_000,
            }]),
        )
        .await;
    backend
        .get_ok(
            "/admin/ad-spaces",
            json!([{
                "id": "space-1",
                "name": "Bannière Accueil",
                "position": "header",
                "dimensions": { "width": 728, "height": 90 },
                "price_per_day": 25_000,
                "price_per_week": 150_000,
                "price_per_month": 500_000,
                "is_active": true,
            }]),
        )
        .await;
    backend
        .get_ok("/admin/ad-orders", json!([order("order-1", "active"), order("order-2", "pending")]))
        .await;

    let app = TestApp::admin(backend).await;
    let client = browser();
    let response = client
        .post(app.url("/login"))
        .form(&[("username", "admin"), ("password", "secret")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    (app, client)
}

#[tokio::test]
async fn test_invalid_order_form_never_reaches_backend() {
    let backend = MockBackend::start().await;
    let (app, client) = signed_in(&backend).await;
    backend.clear_requests().await;

    let response = client
        .post(app.url("/dashboard/orders"))
        .form(&[("client_id", ""), ("ad_space_id", ""), ("content_type", "")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(backend.requests().await.is_empty());
}

#[tokio::test]
async fn test_status_filter_lists_matching_orders_only() {
    let backend = MockBackend::start().await;
    let (app, client) = signed_in(&backend).await;

    let response = client
        .get(app.url("/dashboard/orders?status=active"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();

    assert!(html.contains("/dashboard/orders/order-1/status"));
    assert!(!html.contains("/dashboard/orders/order-2/status"));
    assert!(html.contains("SONABEL"));
}

#[tokio::test]
async fn test_created_order_refreshes_the_list() {
    let backend = MockBackend::start().await;
    let (app, client) = signed_in(&backend).await;
    backend
        .respond(Method::POST, "/admin/ad-orders", StatusCode::OK, order("order-3", "pending"))
        .await;

    // Warm the cache, then create.
    client.get(app.url("/dashboard/orders")).send().await.unwrap();
    let response = client
        .post(app.url("/dashboard/orders"))
        .form(&[
            ("client_id", "client-1"),
            ("ad_space_id", "space-1"),
            ("content_type", "image"),
            ("content_url", "https://cdn.lcatv.bf/ads/banner.png"),
            ("start_date", "2025-01-01T00:00"),
            ("end_date", "2025-01-31T00:00"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard/orders"));

    let created = backend.requests_to(&Method::POST, "/admin/ad-orders").await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].bearer(), Some(ADMIN_TOKEN));
    assert!(created[0].body.contains(r#""content_type":"image""#));

    let html = client
        .get(app.url("/dashboard/orders"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Commande créée (750 000 FCFA)"));
    assert_eq!(backend.requests_to(&Method::GET, "/admin/ad-orders").await.len(), 2);
}
