//! Settings page: profile and connection details.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use lca_tv_client::query::STATS_REFRESH_INTERVAL;
use lca_tv_core::format::format_date_time;

use super::Page;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub page: Page,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: &'static str,
    pub last_login: String,
    pub api_url: String,
    pub refresh_secs: u64,
    pub secure_cookies: bool,
}

/// GET /dashboard/settings
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<SettingsTemplate, AppError> {
    let user = &admin.user;
    let config = state.config();
    Ok(SettingsTemplate {
        page: Page::load(&admin, "/dashboard/settings").await?,
        username: user.username.clone(),
        full_name: user.display_name().to_string(),
        email: user.email.clone(),
        role: user.role_label(),
        last_login: user
            .last_login
            .as_ref()
            .map_or_else(|| "-".to_string(), format_date_time),
        api_url: config.api.base_url.to_string(),
        refresh_secs: STATS_REFRESH_INTERVAL.as_secs(),
        secure_cookies: config.is_secure(),
    })
}
