//! Emissions screen: videos grouped by show.
//!
//! The page polls itself every five minutes; htmx requests get only the
//! rows fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use chrono::Local;
use lca_tv_core::emissions::{ShowRow, categorize, featured};
use tracing::instrument;

use super::{Page, VideoCard, or_empty};
use crate::error::AppError;
use crate::filters;
use crate::middleware::Visitor;
use crate::state::AppState;

/// Videos fetched for categorization.
pub const EMISSIONS_LIMIT: u32 = 50;
/// Refresh period of the rows, in seconds.
pub const REFRESH_SECS: u64 = 300;

/// One show with its cards.
#[derive(Debug, Clone)]
pub struct EmissionRow {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub videos: Vec<VideoCard>,
}

impl From<&ShowRow> for EmissionRow {
    fn from(row: &ShowRow) -> Self {
        Self {
            key: row.key,
            label: row.label,
            description: row.description,
            videos: VideoCard::all(&row.videos),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "emissions/index.html")]
pub struct EmissionsTemplate {
    pub page: Page,
    pub featured: Option<VideoCard>,
    pub rows: Vec<EmissionRow>,
    pub updated_at: String,
    pub refresh_secs: u64,
}

#[derive(Template, WebTemplate)]
#[template(path = "emissions/_rows.html")]
pub struct EmissionRowsFragment {
    pub rows: Vec<EmissionRow>,
    pub updated_at: String,
}

/// GET /emissions
#[instrument(skip(visitor, state, headers))]
pub async fn index(
    visitor: Visitor,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let videos = or_empty(
        "emissions",
        state.content().latest_videos(EMISSIONS_LIMIT).await,
    );
    let rows: Vec<EmissionRow> = categorize(&videos)
        .iter()
        .filter(|row| !row.videos.is_empty())
        .map(EmissionRow::from)
        .collect();
    let updated_at = Local::now().format("%H:%M").to_string();

    if headers.contains_key("hx-request") {
        return Ok(EmissionRowsFragment { rows, updated_at }.into_response());
    }

    Ok(EmissionsTemplate {
        page: Page::load(&visitor, "/emissions").await?,
        featured: featured(&videos).map(|v| VideoCard::new(v, &chrono::Utc::now())),
        rows,
        updated_at,
        refresh_secs: REFRESH_SECS,
    }
    .into_response())
}
