//! Home screen: live card, latest breaking news and the video grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use lca_tv_core::emissions::HomeCategory;
use lca_tv_core::models::LiveStream;
use serde::Deserialize;
use tracing::instrument;

use super::{NewsRow, Page, VideoCard, or_empty};
use crate::error::AppError;
use crate::filters;
use crate::middleware::Visitor;
use crate::state::AppState;

/// Videos fetched for the grid.
pub const HOME_VIDEO_LIMIT: u32 = 20;
/// Breaking news shown under the live card.
pub const HOME_NEWS_LIMIT: u32 = 3;

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Category chip with its selection state.
#[derive(Debug, Clone)]
pub struct CategoryChip {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: Page,
    pub live: Option<LiveStream>,
    pub news: Vec<NewsRow>,
    pub categories: Vec<CategoryChip>,
    pub videos: Vec<VideoCard>,
}

/// GET /
#[instrument(skip(visitor, state))]
pub async fn index(
    visitor: Visitor,
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate, AppError> {
    let selected = HomeCategory::from_key(query.category.as_deref().unwrap_or_default());
    let content = state.content();
    let (live, news, videos) = tokio::join!(
        content.live(),
        content.breaking_news(Some(HOME_NEWS_LIMIT)),
        content.latest_videos(HOME_VIDEO_LIMIT),
    );

    let live = live
        .inspect_err(|e| tracing::warn!(error = %e, "Live stream unavailable"))
        .ok();
    let videos = or_empty("videos", videos);
    let videos: Vec<_> = videos
        .into_iter()
        .filter(|v| selected.matches(v))
        .collect();

    Ok(HomeTemplate {
        page: Page::load(&visitor, "/").await?,
        live,
        news: NewsRow::all(&or_empty("breaking news", news)),
        categories: HomeCategory::ALL
            .iter()
            .map(|c| CategoryChip {
                key: c.key(),
                label: c.label(),
                active: *c == selected,
            })
            .collect(),
        videos: VideoCard::all(&videos),
    })
}
