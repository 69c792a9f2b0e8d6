//! Video detail page with its comment thread.
//!
//! The thread is an htmx fragment: posting swaps the whole section with the
//! refreshed list, liking swaps only the button.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use lca_tv_client::SessionUser;
use lca_tv_core::format::{initials, relative_time};
use lca_tv_core::models::{Video, VideoComment, ViewerUser};
use lca_tv_core::validation::{
    CommentInput, FieldErrors, MAX_COMMENT_LENGTH, MAX_COMMENTER_NAME_LENGTH,
};
use lca_tv_core::{CommentId, VideoId};
use tracing::instrument;

use super::emissions::EMISSIONS_LIMIT;
use super::{Page, VideoCard, or_empty};
use crate::error::AppError;
use crate::filters;
use crate::middleware::Visitor;
use crate::state::AppState;

pub const POST_FAILED: &str = "Impossible de publier le commentaire. Veuillez réessayer.";
pub const OFFLINE: &str = "Les commentaires sont indisponibles hors ligne.";

/// Title shown when the video is not in the recent feed.
const UNKNOWN_TITLE: &str = "Vidéo LCA TV";

/// One comment in the thread.
#[derive(Debug, Clone)]
pub struct CommentRow {
    pub id: String,
    pub user_name: String,
    pub initials: String,
    pub content: String,
    pub time_ago: String,
    pub likes: u64,
}

impl CommentRow {
    #[must_use]
    pub fn new(comment: &VideoComment, now: &DateTime<Utc>) -> Self {
        let time_ago = comment
            .time_ago
            .clone()
            .or_else(|| comment.created_at.map(|at| relative_time(&at, now)))
            .unwrap_or_default();
        Self {
            id: comment.id.to_string(),
            user_name: comment.user_name.clone(),
            initials: initials(&comment.user_name),
            content: comment.content.clone(),
            time_ago,
            likes: comment.likes,
        }
    }

    #[must_use]
    pub fn all(comments: &[VideoComment]) -> Vec<Self> {
        let now = Utc::now();
        comments.iter().map(|c| Self::new(c, &now)).collect()
    }
}

/// The comment section: form plus list.
#[derive(Template, WebTemplate)]
#[template(path = "emissions/_comments.html")]
pub struct CommentsFragment {
    pub video_id: String,
    pub comments: Vec<CommentRow>,
    pub input: CommentInput,
    pub errors: FieldErrors,
    pub error: Option<String>,
    pub max_content: usize,
    pub max_name: usize,
}

impl CommentsFragment {
    fn new(video_id: &VideoId, comments: &[VideoComment]) -> Self {
        Self {
            video_id: video_id.to_string(),
            comments: CommentRow::all(comments),
            input: CommentInput::default(),
            errors: FieldErrors::new(),
            error: None,
            max_content: MAX_COMMENT_LENGTH,
            max_name: MAX_COMMENTER_NAME_LENGTH,
        }
    }

    fn with_input(mut self, input: CommentInput, errors: FieldErrors) -> Self {
        self.input = input;
        self.errors = errors;
        self
    }

    fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

/// The like button of one comment.
#[derive(Debug, Clone)]
pub struct LikeButton {
    pub id: String,
    pub likes: u64,
}

#[derive(Template, WebTemplate)]
#[template(path = "emissions/_like.html")]
pub struct LikeFragment {
    pub comment: LikeButton,
}

#[derive(Template, WebTemplate)]
#[template(path = "emissions/detail.html")]
pub struct DetailTemplate {
    pub page: Page,
    pub video: VideoCard,
    pub video_id: String,
    pub comments: Vec<CommentRow>,
    pub input: CommentInput,
    pub errors: FieldErrors,
    pub error: Option<String>,
    pub max_content: usize,
    pub max_name: usize,
}

/// Signed-in viewer whose name and email go on the comment.
fn commenter(visitor: &Visitor) -> Option<&ViewerUser> {
    match &visitor.user {
        Some(SessionUser::Viewer(user)) => Some(user),
        _ => None,
    }
}

/// GET /emissions/{video_id}
#[instrument(skip(visitor, state))]
pub async fn detail(
    visitor: Visitor,
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<DetailTemplate, AppError> {
    let video_id = VideoId::new(video_id);
    let videos = or_empty(
        "emissions",
        state.content().latest_videos(EMISSIONS_LIMIT).await,
    );
    let video = videos
        .into_iter()
        .find(|v| v.id == video_id)
        .unwrap_or_else(|| Video {
            id: video_id.clone(),
            title: UNKNOWN_TITLE.to_string(),
            description: String::new(),
            thumbnail: String::new(),
            published_at: String::new(),
            view_count: String::new(),
            like_count: String::new(),
            duration: String::new(),
            category: String::new(),
        });
    let comments = or_empty("comments", state.content().comments(&video_id).await);
    let section = CommentsFragment::new(&video_id, &comments);

    Ok(DetailTemplate {
        page: Page::load(&visitor, "/emissions").await?,
        video: VideoCard::new(&video, &Utc::now()),
        video_id: section.video_id,
        comments: section.comments,
        input: section.input,
        errors: section.errors,
        error: section.error,
        max_content: section.max_content,
        max_name: section.max_name,
    })
}

/// GET /emissions/{video_id}/comments
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> CommentsFragment {
    let video_id = VideoId::new(video_id);
    let comments = or_empty("comments", state.content().comments(&video_id).await);
    CommentsFragment::new(&video_id, &comments)
}

/// POST /emissions/{video_id}/comments
///
/// Invalid comments never reach the backend. On success the thread is
/// refetched so the new comment shows in backend order.
#[instrument(skip(visitor, state, input))]
pub async fn post(
    visitor: Visitor,
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Form(input): Form<CommentInput>,
) -> Response {
    let video_id = VideoId::new(video_id);
    let comment = match input.validate(&video_id, commenter(&visitor)) {
        Ok(comment) => comment,
        Err(errors) => {
            let comments = or_empty("comments", state.content().comments(&video_id).await);
            let section = CommentsFragment::new(&video_id, &comments).with_input(input, errors);
            return (StatusCode::UNPROCESSABLE_ENTITY, section).into_response();
        }
    };

    if state.config().offline {
        let section = CommentsFragment::new(&video_id, &[])
            .with_input(input, FieldErrors::new())
            .with_error(OFFLINE);
        return (StatusCode::SERVICE_UNAVAILABLE, section).into_response();
    }

    match visitor.api.content().post_comment(&video_id, &comment).await {
        Ok(posted) => {
            tracing::info!(comment_id = %posted.id, video_id = %video_id, "Comment posted");
            let comments = or_empty("comments", state.content().comments(&video_id).await);
            CommentsFragment::new(&video_id, &comments).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, video_id = %video_id, "Comment post failed");
            let comments = or_empty("comments", state.content().comments(&video_id).await);
            let section = CommentsFragment::new(&video_id, &comments)
                .with_input(input, FieldErrors::new())
                .with_error(POST_FAILED);
            (StatusCode::BAD_GATEWAY, section).into_response()
        }
    }
}

/// POST /comments/{comment_id}/like
#[instrument(skip(visitor, state))]
pub async fn like(
    visitor: Visitor,
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<Response, AppError> {
    if state.config().offline {
        return Ok((StatusCode::SERVICE_UNAVAILABLE, OFFLINE).into_response());
    }
    let comment_id = CommentId::new(comment_id);
    let reply = visitor
        .api
        .content()
        .like_comment(&comment_id)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, comment_id = %comment_id, "Comment like failed"))?;
    Ok(LikeFragment {
        comment: LikeButton {
            id: comment_id.to_string(),
            likes: reply.likes,
        },
    }
    .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn comment(time_ago: Option<&str>) -> VideoComment {
        VideoComment {
            id: CommentId::new("c-1"),
            video_id: VideoId::new("zjWu0nZyBCY"),
            content: "Bravo à la rédaction".to_string(),
            user_name: "Awa Kaboré".to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 12, 14, 19, 0, 0).unwrap()),
            likes: 4,
            time_ago: time_ago.map(str::to_string),
        }
    }

    #[test]
    fn test_row_prefers_backend_time_ago() {
        let now = Utc.with_ymd_and_hms(2024, 12, 14, 21, 0, 0).unwrap();
        assert_eq!(CommentRow::new(&comment(Some("Il y a 2h")), &now).time_ago, "Il y a 2h");

        let row = CommentRow::new(&comment(None), &now);
        assert_eq!(row.time_ago, "Il y a 2 heures");
        assert_eq!(row.initials, "AK");
        assert_eq!(row.likes, 4);
    }
}
