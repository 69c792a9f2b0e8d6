//! Viewer content: videos, comments, journal, live stream, breaking news.

use lca_tv_core::models::{
    BreakingNews, CommentLikes, LiveStream, NewComment, Video, VideoComment,
};
use lca_tv_core::types::{CommentId, VideoId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{ApiError, Result};

endpoint_family!(
    /// Public viewer content.
    ContentApi
);

/// The video endpoints answer 200 with `{"error": "..."}` when the upstream
/// YouTube call fails.
#[derive(Deserialize)]
#[serde(untagged)]
enum VideoList {
    Videos(Vec<Video>),
    Failed { error: String },
}

impl VideoList {
    fn into_result(self) -> Result<Vec<Video>> {
        match self {
            Self::Videos(videos) => Ok(videos),
            Self::Failed { error } => Err(ApiError::Api {
                status: 502,
                message: error,
            }),
        }
    }
}

/// Most comments fetched for one video.
pub const COMMENT_PAGE: u32 = 50;

/// `POST /videos/{id}/comments` acknowledges with the stored comment.
#[derive(Deserialize)]
struct CommentPosted {
    comment: VideoComment,
}

impl ContentApi<'_> {
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn latest_videos(&self, limit: u32) -> Result<Vec<Video>> {
        let list: VideoList = self
            .client
            .get_query("/videos/latest", &[("limit", limit)])
            .await?;
        list.into_result()
    }

    /// Evening journal playlist, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn journal(&self, limit: u32) -> Result<Vec<Video>> {
        let list: VideoList = self
            .client
            .get_query("/journal/playlist", &[("limit", limit)])
            .await?;
        list.into_result()
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn live(&self) -> Result<LiveStream> {
        self.client.get("/live/current").await
    }

    /// Active breaking news, most recent first.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn breaking_news(&self, limit: Option<u32>) -> Result<Vec<BreakingNews>> {
        match limit {
            Some(limit) => {
                self.client
                    .get_query("/breaking-news", &[("limit", limit)])
                    .await
            }
            None => self.client.get("/breaking-news").await,
        }
    }

    /// Comments on a video, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn comments(&self, video_id: &VideoId) -> Result<Vec<VideoComment>> {
        self.client
            .get_query(
                &format!("/videos/{video_id}/comments"),
                &[("limit", COMMENT_PAGE)],
            )
            .await
    }

    /// Post a comment and return it as stored by the backend.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, comment))]
    pub async fn post_comment(
        &self,
        video_id: &VideoId,
        comment: &NewComment,
    ) -> Result<VideoComment> {
        let posted: CommentPosted = self
            .client
            .post(&format!("/videos/{video_id}/comments"), comment)
            .await?;
        Ok(posted.comment)
    }

    /// Add a like; returns the updated count.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the comment no longer exists.
    #[instrument(skip(self))]
    pub async fn like_comment(&self, id: &CommentId) -> Result<CommentLikes> {
        self.client
            .put_empty(&format!("/comments/{id}/like"))
            .await
    }
}
