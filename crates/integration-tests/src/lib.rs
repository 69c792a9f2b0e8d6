//! End-to-end tests for the LCA TV apps.
//!
//! Each test starts a [`MockBackend`] on a random local port, points the
//! dashboard or viewer at it, serves the app on another random port, and
//! drives it with a cookie-keeping HTTP client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lca-tv-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `admin_session` - Dashboard login, stats, expiry handling
//! - `admin_orders` - Order form validation
//! - `viewer_content` - Ticker feed, content fallback, advertising requests
//! - `viewer_comments` - Video comment thread, posting and likes
//! - `client_api` - REST client session behavior

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use lca_tv_client::ClientConfig;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Path prefix of the backend API.
pub const API_PREFIX: &str = "/api";

/// Bearer token handed out by [`MockBackend::accept_admin_login`].
pub const ADMIN_TOKEN: &str = "admin-token-123";
/// Bearer token handed out by [`MockBackend::accept_viewer_login`].
pub const VIEWER_TOKEN: &str = "viewer-token-456";

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path below [`API_PREFIX`], e.g. `/admin/dashboard/stats`.
    pub path: String,
    /// Raw query string, e.g. `limit=3`.
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// The bearer token, if the request carried one.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.authorization.as_deref()?.strip_prefix("Bearer ")
    }
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<HashMap<(Method, String), (StatusCode, Value)>>,
}

/// Scripted stand-in for the REST backend.
///
/// Unscripted routes answer 404 with a `detail` body, as the real backend
/// does.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockBackend {
    /// Bind on `127.0.0.1:0` and start serving.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let router = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));
        let (addr, task) = serve(router).await;
        Self { addr, state, task }
    }

    /// Client configuration pointing at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the local URL does not parse.
    #[must_use]
    pub fn api_config(&self) -> ClientConfig {
        ClientConfig::new(&format!("http://{}{API_PREFIX}", self.addr))
            .unwrap_or_else(|e| panic!("mock backend URL: {e}"))
    }

    /// Answer `method path` with `status` and a JSON body from now on.
    pub async fn respond(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .replies
            .lock()
            .await
            .insert((method, path.to_string()), (status, body));
    }

    /// Answer `GET path` with 200 and `body`.
    pub async fn get_ok(&self, path: &str, body: Value) {
        self.respond(Method::GET, path, StatusCode::OK, body).await;
    }

    /// Answer `method path` with a 401.
    pub async fn unauthorized(&self, method: Method, path: &str) {
        self.respond(
            method,
            path,
            StatusCode::UNAUTHORIZED,
            json!({ "detail": "Could not validate credentials" }),
        )
        .await;
    }

    /// Accept the dashboard login and return [`ADMIN_TOKEN`] with the user.
    pub async fn accept_admin_login(&self) {
        self.respond(
            Method::POST,
            "/auth/login",
            StatusCode::OK,
            json!({
                "access_token": ADMIN_TOKEN,
                "token_type": "bearer",
                "user": admin_user(),
            }),
        )
        .await;
    }

    /// Accept a login the way the content backend does: a bare token, with
    /// a role-less account behind `/auth/me`.
    pub async fn accept_viewer_login(&self) {
        self.respond(
            Method::POST,
            "/auth/login",
            StatusCode::OK,
            json!({ "access_token": VIEWER_TOKEN, "token_type": "bearer" }),
        )
        .await;
        self.get_ok("/auth/me", viewer_user()).await;
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// Requests received for `method path`.
    pub async fn requests_to(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.method == *method && r.path == path)
            .collect()
    }

    /// Forget the requests received so far.
    pub async fn clear_requests(&self) {
        self.state.requests.lock().await.clear();
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or_else(|| uri.path())
        .to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().await.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let reply = state.replies.lock().await.get(&(method, path)).cloned();
    match reply {
        Some((status, body)) => (status, axum::Json(body)).into_response(),
        None => (StatusCode::NOT_FOUND, axum::Json(json!({ "detail": "Not Found" }))).into_response(),
    }
}

/// Serve `router` on a random local port, with peer addresses available to
/// handlers.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn serve(router: Router) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("bind test listener: {e}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("test listener address: {e}"));
    let task = tokio::spawn(async move {
        let service = router.into_make_service_with_connect_info::<SocketAddr>();
        if let Err(e) = axum::serve(listener, service).await {
            panic!("test server stopped: {e}");
        }
    });
    (addr, task)
}

/// A running app under test.
pub struct TestApp {
    pub base_url: String,
    task: JoinHandle<()>,
}

impl TestApp {
    /// Serve the dashboard against `backend`.
    ///
    /// # Panics
    ///
    /// Panics if the app state cannot be built.
    pub async fn admin(backend: &MockBackend) -> Self {
        let config = lca_tv_admin::config::AdminConfig::local(backend.api_config());
        let state = lca_tv_admin::state::AppState::new(config)
            .unwrap_or_else(|e| panic!("admin state: {e}"));
        Self::start(lca_tv_admin::app(state)).await
    }

    /// Serve the viewer app against `backend`.
    ///
    /// # Panics
    ///
    /// Panics if the app state cannot be built.
    pub async fn viewer(backend: &MockBackend) -> Self {
        let config = lca_tv_viewer::config::ViewerConfig::local(backend.api_config());
        let state = lca_tv_viewer::state::AppState::new(config)
            .unwrap_or_else(|e| panic!("viewer state: {e}"));
        Self::start(lca_tv_viewer::app(state)).await
    }

    async fn start(router: Router) -> Self {
        let (addr, task) = serve(router).await;
        Self {
            base_url: format!("http://{addr}"),
            task,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A browser-like client: keeps cookies, does not follow redirects.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap_or_else(|e| panic!("test client: {e}"))
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION.as_str())
        .and_then(|v| v.to_str().ok())
}

// =============================================================================
// Fixtures
// =============================================================================

#[must_use]
pub fn admin_user() -> Value {
    json!({
        "id": "admin-1",
        "username": "admin",
        "email": "admin@lcatv.bf",
        "full_name": "Aminata Ouédraogo",
        "role": "admin",
        "is_active": true,
        "created_at": "2024-01-10T09:00:00",
        "last_login": "2024-12-15T08:00:00",
    })
}

#[must_use]
pub fn viewer_user() -> Value {
    json!({
        "id": "viewer-1",
        "username": "ibrahim",
        "email": "ibrahim@example.bf",
        "full_name": "Ibrahim Sawadogo",
        "phone": "+22670445566",
        "profile_image": null,
        "created_at": "2024-06-01T12:00:00",
        "is_active": true,
        "preferences": {},
    })
}

#[must_use]
pub fn dashboard_stats() -> Value {
    json!({
        "total_clients": 42,
        "active_orders": 7,
        "monthly_revenue": 1_500_000,
        "total_impressions": 12_000,
        "total_clicks": 300,
        "pending_payments": 250_000,
    })
}

#[must_use]
pub fn revenue_analytics() -> Value {
    json!({
        "monthly_revenue": [
            { "month": "November 2024", "revenue": 900_000, "orders_count": 3 },
            { "month": "December 2024", "revenue": 1_500_000, "orders_count": 5 },
        ],
        "total_revenue": 2_400_000,
        "average_monthly_revenue": 1_200_000,
        "growth_rate": 66.7,
    })
}

#[must_use]
pub fn video_comment(id: &str, content: &str, likes: u64) -> Value {
    json!({
        "id": id,
        "video_id": "zjWu0nZyBCY",
        "content": content,
        "user_name": "Awa Kaboré",
        "created_at": "2024-12-15T08:00:00",
        "likes": likes,
        "time_ago": "Il y a 2h",
    })
}

#[must_use]
pub fn breaking_news(title: &str) -> Value {
    json!({
        "id": "news-1",
        "title": title,
        "content": "Détails à suivre",
        "priority": "urgent",
        "category": "politique",
        "source": "LCA TV",
        "created_at": "2024-12-15T08:00:00",
        "is_active": true,
    })
}
