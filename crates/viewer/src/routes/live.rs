//! Live stream screen.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use lca_tv_core::models::{LiveStream, embed_url};
use tracing::instrument;

use super::{Page, VideoCard, or_empty};
use crate::error::AppError;
use crate::filters;
use crate::middleware::Visitor;
use crate::state::AppState;

/// Recent videos listed under the player.
const MORE_VIDEOS: u32 = 6;

/// Audience shown next to the live badge.
pub const VIEWER_COUNT: &str = "12.5K spectateurs";

#[derive(Template, WebTemplate)]
#[template(path = "live.html")]
pub struct LiveTemplate {
    pub page: Page,
    pub live: Option<LiveStream>,
    pub player_url: String,
    pub viewer_count: &'static str,
    pub more: Vec<VideoCard>,
}

/// GET /live
///
/// Autoplay follows the visitor's preference.
#[instrument(skip(visitor, state))]
pub async fn index(visitor: Visitor, State(state): State<AppState>) -> Result<LiveTemplate, AppError> {
    let content = state.content();
    let (live, more) = tokio::join!(content.live(), content.latest_videos(MORE_VIDEOS));
    let page = Page::load(&visitor, "/live").await?;

    let live = live
        .inspect_err(|e| tracing::warn!(error = %e, "Live stream unavailable"))
        .ok();
    let player_url = live
        .as_ref()
        .map(|l| embed_url(l.video_id.as_str(), page.preferences.autoplay))
        .unwrap_or_default();

    Ok(LiveTemplate {
        page,
        live,
        player_url,
        viewer_count: VIEWER_COUNT,
        more: VideoCard::all(&or_empty("videos", more)),
    })
}
