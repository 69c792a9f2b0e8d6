//! HTTP route handlers for the viewer app.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Content
//! GET  /                       - Home: live card, breaking news, latest videos (?category=)
//! GET  /live                   - Live stream embed
//! GET  /journal                - Journal playlist, newest first
//! GET  /emissions              - Shows by category (rows fragment for htmx, polled every 5 min)
//! GET  /emissions/{video_id}    - Video player with its comment thread
//! GET  /emissions/{video_id}/comments - Comment thread fragment
//! POST /emissions/{video_id}/comments - Post a comment, returns the refreshed thread
//! POST /comments/{comment_id}/like    - Like a comment, returns the button
//! GET  /breaking-news          - Breaking news (?priority=urgent|important|normal)
//! GET  /ticker                 - Ticker fragment, fetched fresh on every mount
//!
//! # Account
//! GET  /profile                - Profile (signed-in viewer or demo user)
//! GET  /settings               - Preference toggles
//! POST /settings               - Save preferences
//! GET  /contact                - Contact form
//! POST /contact                - Validate and acknowledge a message
//! GET  /advertising/create     - Advertising request form
//! POST /advertising/create     - Send the request to the backend
//!
//! # Auth (rate limited)
//! GET  /auth/login             - Login page
//! POST /auth/login             - Viewer login against the backend
//! GET  /auth/register          - Registration page
//! POST /auth/register          - Create an account and sign in
//! POST /auth/logout            - Sign out
//! ```

pub mod advertising;
pub mod auth;
pub mod comments;
pub mod contact;
pub mod emissions;
pub mod home;
pub mod journal;
pub mod live;
pub mod news;
pub mod profile;
pub mod settings;
pub mod ticker;

use axum::{
    Router,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use lca_tv_client::SessionUser;
use lca_tv_core::format::{initials, parse_timestamp, relative_time};
use lca_tv_core::models::{BreakingNews, Video};

use crate::error::AppError;
use crate::middleware::{Visitor, load_preferences, take_flash};
use crate::models::{Flash, Preferences};
use crate::state::AppState;

/// Build the route tree, except `/auth` which the caller rate limits.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/live", get(live::index))
        .route("/journal", get(journal::index))
        .route("/emissions", get(emissions::index))
        .route("/emissions/{video_id}", get(comments::detail))
        .route(
            "/emissions/{video_id}/comments",
            get(comments::list).post(comments::post),
        )
        .route("/comments/{comment_id}/like", post(comments::like))
        .route("/breaking-news", get(news::index))
        .route("/ticker", get(ticker::fragment))
        .route("/profile", get(profile::index))
        .route("/settings", get(settings::index).post(settings::save))
        .route("/contact", get(contact::index).post(contact::submit))
        .route(
            "/advertising/create",
            get(advertising::index).post(advertising::submit),
        )
}

// =============================================================================
// Shared page context
// =============================================================================

/// Signed-in viewer as shown in the header.
#[derive(Debug, Clone)]
pub struct UserBadge {
    pub name: String,
    pub initials: String,
}

impl From<&SessionUser> for UserBadge {
    fn from(user: &SessionUser) -> Self {
        Self {
            name: user.display_name().to_string(),
            initials: initials(user.display_name()),
        }
    }
}

/// Everything the base layout needs.
#[derive(Debug, Clone)]
pub struct Page {
    pub user: Option<UserBadge>,
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub preferences: Preferences,
}

impl Page {
    /// Layout context for `path`, consuming the pending flash.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn load(visitor: &Visitor, current_path: &'static str) -> Result<Self, AppError> {
        Ok(Self {
            user: visitor.user.as_ref().map(UserBadge::from),
            current_path,
            flash: take_flash(&visitor.session).await?,
            preferences: load_preferences(&visitor.session).await?,
        })
    }

    /// Show `message` as an error banner (after any pending flash).
    #[must_use]
    pub fn with_error(mut self, message: Option<String>) -> Self {
        if let Some(message) = message {
            self.flash = Some(Flash::error(message));
        }
        self
    }

    /// Whether `prefix` is the active tab.
    #[must_use]
    pub fn is_active(&self, prefix: &str) -> bool {
        if prefix == "/" {
            self.current_path == prefix
        } else {
            self.current_path.starts_with(prefix)
        }
    }

    #[must_use]
    pub const fn dark_mode(&self) -> bool {
        self.preferences.dark_mode
    }
}

// =============================================================================
// Shared view rows
// =============================================================================

/// Video card for grids and rows.
#[derive(Debug, Clone)]
pub struct VideoCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub duration: String,
    pub views: String,
    pub published: String,
    pub embed_url: String,
}

impl VideoCard {
    #[must_use]
    pub fn new(video: &Video, now: &DateTime<Utc>) -> Self {
        Self {
            id: video.id.to_string(),
            title: video.title.clone(),
            description: video.description.clone(),
            thumbnail: video.thumbnail.clone(),
            duration: video.duration_display(),
            views: video.views_display(),
            published: parse_timestamp(&video.published_at)
                .map(|at| relative_time(&at, now))
                .unwrap_or_default(),
            embed_url: video.embed_url(),
        }
    }

    /// Cards for a list of videos, relative to now.
    #[must_use]
    pub fn all(videos: &[Video]) -> Vec<Self> {
        let now = Utc::now();
        videos.iter().map(|v| Self::new(v, &now)).collect()
    }
}

/// Breaking news entry for lists.
#[derive(Debug, Clone)]
pub struct NewsRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub source: String,
    pub category: String,
    pub priority: &'static str,
    pub priority_label: &'static str,
    pub time_ago: String,
}

impl NewsRow {
    #[must_use]
    pub fn new(news: &BreakingNews, now: &DateTime<Utc>) -> Self {
        Self {
            id: news.id.to_string(),
            title: news.title.clone(),
            content: news.content.clone(),
            source: news.source.clone(),
            category: news.category.clone(),
            priority: news.priority.as_str(),
            priority_label: news.priority.label(),
            time_ago: relative_time(&news.created_at, now),
        }
    }

    #[must_use]
    pub fn all<'a>(news: impl IntoIterator<Item = &'a BreakingNews>) -> Vec<Self> {
        let now = Utc::now();
        news.into_iter().map(|n| Self::new(n, &now)).collect()
    }
}

/// Log a failed content read and keep going with an empty value.
pub fn or_empty<T: Default>(what: &'static str, result: lca_tv_client::Result<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, content = what, "Content read failed");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use lca_tv_client::ApiError;

    use super::*;

    #[test]
    fn test_or_empty_swallows_failures() {
        let videos: Vec<Video> = or_empty(
            "videos",
            Err(ApiError::Api {
                status: 503,
                message: "down".to_string(),
            }),
        );
        assert!(videos.is_empty());
    }
}
