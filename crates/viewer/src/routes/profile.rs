//! Profile screen.

use askama::Template;
use askama_web::WebTemplate;

use super::Page;
use crate::error::AppError;
use crate::filters;
use crate::middleware::Visitor;
use crate::models::ProfileView;

/// Shown in the profile footer.
pub const APP_VERSION: &str = "1.0.0";

#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub page: Page,
    pub profile: ProfileView,
    pub app_version: &'static str,
}

/// GET /profile
pub async fn index(visitor: Visitor) -> Result<ProfileTemplate, AppError> {
    Ok(ProfileTemplate {
        profile: ProfileView::from_session(visitor.user.as_ref()),
        page: Page::load(&visitor, "/profile").await?,
        app_version: APP_VERSION,
    })
}
