//! Journal playlist screen.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use super::{Page, VideoCard};
use crate::error::AppError;
use crate::filters;
use crate::middleware::Visitor;
use crate::state::AppState;

/// Playlist items fetched for the screen.
pub const JOURNAL_LIMIT: u32 = 30;

#[derive(Template, WebTemplate)]
#[template(path = "journal.html")]
pub struct JournalTemplate {
    pub page: Page,
    /// Newest edition.
    pub featured: Option<VideoCard>,
    pub previous: Vec<VideoCard>,
}

/// GET /journal
#[instrument(skip(visitor, state))]
pub async fn index(
    visitor: Visitor,
    State(state): State<AppState>,
) -> Result<JournalTemplate, AppError> {
    let (videos, error) = match state.content().journal(JOURNAL_LIMIT).await {
        Ok(videos) => (videos, None),
        Err(e) => {
            tracing::warn!(error = %e, "Journal unavailable");
            (Vec::new(), Some(e.user_message()))
        }
    };

    let mut cards = VideoCard::all(&videos).into_iter();
    Ok(JournalTemplate {
        page: Page::load(&visitor, "/journal").await?.with_error(error),
        featured: cards.next(),
        previous: cards.collect(),
    })
}
