//! Where the viewer screens get their content.
//!
//! Every screen reads through [`ContentSource`]. [`BackendSource`] calls the
//! LCA TV backend, [`PlaceholderSource`] serves the built-in demo content,
//! and [`FallbackSource`] tries the first and answers from the second
//! whenever a call fails.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use lca_tv_client::{ApiClient, QueryClient, QueryKey, Result, RetryPolicy};
use lca_tv_core::models::{BreakingNews, LiveStream, Video, VideoComment};
use lca_tv_core::{NewsId, NewsPriority, VideoId};
use tracing::{instrument, warn};

/// Read access to viewer content.
#[async_trait]
pub trait ContentSource: Send + Sync + fmt::Debug {
    /// Newest channel videos, newest first.
    async fn latest_videos(&self, limit: u32) -> Result<Vec<Video>>;

    /// Evening journal playlist, newest first.
    async fn journal(&self, limit: u32) -> Result<Vec<Video>>;

    /// The current live broadcast.
    async fn live(&self) -> Result<LiveStream>;

    /// Active breaking news, most recent first.
    async fn breaking_news(&self, limit: Option<u32>) -> Result<Vec<BreakingNews>>;

    /// Viewer comments on a video, newest first.
    async fn comments(&self, video_id: &VideoId) -> Result<Vec<VideoComment>>;
}

// =============================================================================
// BackendSource
// =============================================================================

/// Content from the backend.
///
/// Video lists and the live stream are cached for the query TTL (five
/// minutes, the emissions refresh period). Breaking news and comments are
/// always fetched.
#[derive(Clone)]
pub struct BackendSource {
    api: ApiClient,
    query: QueryClient,
}

impl BackendSource {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            query: QueryClient::new(lca_tv_client::query::DEFAULT_TTL, RetryPolicy::none()),
        }
    }
}

impl fmt::Debug for BackendSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSource")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ContentSource for BackendSource {
    #[instrument(skip(self))]
    async fn latest_videos(&self, limit: u32) -> Result<Vec<Video>> {
        let api = &self.api;
        self.query
            .fetch(QueryKey::LatestVideos(limit), || async move {
                api.content().latest_videos(limit).await
            })
            .await
    }

    #[instrument(skip(self))]
    async fn journal(&self, limit: u32) -> Result<Vec<Video>> {
        let api = &self.api;
        self.query
            .fetch(QueryKey::Journal(limit), || async move {
                api.content().journal(limit).await
            })
            .await
    }

    #[instrument(skip(self))]
    async fn live(&self) -> Result<LiveStream> {
        let api = &self.api;
        self.query
            .fetch(QueryKey::LiveStream, || async move { api.content().live().await })
            .await
    }

    #[instrument(skip(self))]
    async fn breaking_news(&self, limit: Option<u32>) -> Result<Vec<BreakingNews>> {
        self.api.content().breaking_news(limit).await
    }

    #[instrument(skip(self))]
    async fn comments(&self, video_id: &VideoId) -> Result<Vec<VideoComment>> {
        self.api.content().comments(video_id).await
    }
}

// =============================================================================
// PlaceholderSource
// =============================================================================

/// Built-in demo content. Never fails.
#[derive(Debug, Clone)]
pub struct PlaceholderSource {
    live_video_id: VideoId,
}

impl PlaceholderSource {
    #[must_use]
    pub const fn new(live_video_id: VideoId) -> Self {
        Self { live_video_id }
    }

    fn live_video(&self) -> Video {
        Video {
            id: self.live_video_id.clone(),
            title: "LCA TV - Diffusion en Direct".to_string(),
            description: "Suivez LCA TV 24h/24 pour toute l'actualité du Burkina Faso".to_string(),
            thumbnail: thumbnail(self.live_video_id.as_str()),
            published_at: Utc::now().to_rfc3339(),
            view_count: "25420".to_string(),
            like_count: "1240".to_string(),
            duration: "LIVE".to_string(),
            category: "live".to_string(),
        }
    }

    fn evening_journal() -> Video {
        Video {
            id: VideoId::new("zjWu0nZyBCY"),
            title: "Journal LCA TV - Édition du Soir".to_string(),
            description: "Le journal du soir de LCA TV : l'essentiel de l'actualité nationale et internationale".to_string(),
            thumbnail: thumbnail("zjWu0nZyBCY"),
            published_at: (Utc::now() - Duration::hours(2)).to_rfc3339(),
            view_count: "18750".to_string(),
            like_count: "890".to_string(),
            duration: "30:45".to_string(),
            category: "actualites".to_string(),
        }
    }
}

fn thumbnail(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg")
}

fn news(
    id: &str,
    priority: NewsPriority,
    content: &str,
    source: &str,
    category: &str,
    hours_ago: i64,
) -> BreakingNews {
    BreakingNews {
        id: NewsId::new(id),
        title: priority.headline().to_string(),
        content: content.to_string(),
        priority,
        source: source.to_string(),
        category: category.to_string(),
        created_at: Utc::now() - Duration::hours(hours_ago),
        is_active: true,
    }
}

/// Demo breaking news: two urgent items lead so the ticker shows both.
fn demo_news() -> Vec<BreakingNews> {
    vec![
        news(
            "1",
            NewsPriority::Urgent,
            "Le Président du Faso annonce de nouvelles mesures économiques lors d'une allocution télévisée",
            "LCA TV",
            "politique",
            0,
        ),
        news(
            "2",
            NewsPriority::Urgent,
            "Suivez en direct l'actualité sur LCA TV",
            "Rédaction LCA TV",
            "general",
            1,
        ),
        news(
            "3",
            NewsPriority::Important,
            "Suivez en direct la cérémonie d'ouverture du Festival des Arts et de la Culture",
            "LCA TV",
            "culture",
            2,
        ),
        news(
            "4",
            NewsPriority::Normal,
            "Ouverture d'une nouvelle université publique dans la région du Centre-Est",
            "Correspondant LCA TV",
            "education",
            3,
        ),
    ]
}

fn take<T>(mut items: Vec<T>, limit: Option<u32>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    items
}

#[async_trait]
impl ContentSource for PlaceholderSource {
    async fn latest_videos(&self, limit: u32) -> Result<Vec<Video>> {
        Ok(take(vec![self.live_video(), Self::evening_journal()], Some(limit)))
    }

    async fn journal(&self, limit: u32) -> Result<Vec<Video>> {
        Ok(take(vec![Self::evening_journal()], Some(limit)))
    }

    async fn live(&self) -> Result<LiveStream> {
        Ok(LiveStream {
            video_id: self.live_video_id.clone(),
            title: "LCA TV - Diffusion en Direct".to_string(),
            description: "Suivez LCA TV 24h/24 pour toute l'actualité du Burkina Faso".to_string(),
            thumbnail: thumbnail(self.live_video_id.as_str()),
            is_live: true,
        })
    }

    async fn breaking_news(&self, limit: Option<u32>) -> Result<Vec<BreakingNews>> {
        Ok(take(demo_news(), limit))
    }

    async fn comments(&self, _video_id: &VideoId) -> Result<Vec<VideoComment>> {
        Ok(Vec::new())
    }
}

// =============================================================================
// FallbackSource
// =============================================================================

/// Tries `primary` and answers from `placeholder` when a call fails.
#[derive(Debug, Clone)]
pub struct FallbackSource {
    primary: Arc<dyn ContentSource>,
    placeholder: PlaceholderSource,
}

impl FallbackSource {
    #[must_use]
    pub fn new(primary: Arc<dyn ContentSource>, placeholder: PlaceholderSource) -> Self {
        Self {
            primary,
            placeholder,
        }
    }
}

fn fell_back(what: &'static str, error: &lca_tv_client::ApiError) {
    warn!(content = what, error = %error, "Backend content unavailable, serving placeholder");
}

#[async_trait]
impl ContentSource for FallbackSource {
    async fn latest_videos(&self, limit: u32) -> Result<Vec<Video>> {
        match self.primary.latest_videos(limit).await {
            Ok(videos) => Ok(videos),
            Err(e) => {
                fell_back("latest_videos", &e);
                self.placeholder.latest_videos(limit).await
            }
        }
    }

    async fn journal(&self, limit: u32) -> Result<Vec<Video>> {
        match self.primary.journal(limit).await {
            Ok(videos) => Ok(videos),
            Err(e) => {
                fell_back("journal", &e);
                self.placeholder.journal(limit).await
            }
        }
    }

    async fn live(&self) -> Result<LiveStream> {
        match self.primary.live().await {
            Ok(live) => Ok(live),
            Err(e) => {
                fell_back("live", &e);
                self.placeholder.live().await
            }
        }
    }

    async fn breaking_news(&self, limit: Option<u32>) -> Result<Vec<BreakingNews>> {
        match self.primary.breaking_news(limit).await {
            Ok(news) => Ok(news),
            Err(e) => {
                fell_back("breaking_news", &e);
                self.placeholder.breaking_news(limit).await
            }
        }
    }

    async fn comments(&self, video_id: &VideoId) -> Result<Vec<VideoComment>> {
        match self.primary.comments(video_id).await {
            Ok(comments) => Ok(comments),
            Err(e) => {
                fell_back("comments", &e);
                self.placeholder.comments(video_id).await
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use lca_tv_client::ApiError;

    use super::*;

    /// Source whose every call fails with a 503.
    #[derive(Debug, Default)]
    struct DownSource {
        calls: AtomicU32,
    }

    impl DownSource {
        fn fail<T>(&self) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Api {
                status: 503,
                message: "maintenance".to_string(),
            })
        }
    }

    #[async_trait]
    impl ContentSource for DownSource {
        async fn latest_videos(&self, _limit: u32) -> Result<Vec<Video>> {
            self.fail()
        }
        async fn journal(&self, _limit: u32) -> Result<Vec<Video>> {
            self.fail()
        }
        async fn live(&self) -> Result<LiveStream> {
            self.fail()
        }
        async fn breaking_news(&self, _limit: Option<u32>) -> Result<Vec<BreakingNews>> {
            self.fail()
        }
        async fn comments(&self, _video_id: &VideoId) -> Result<Vec<VideoComment>> {
            self.fail()
        }
    }

    fn placeholder() -> PlaceholderSource {
        PlaceholderSource::new(VideoId::new("ixQEmhTbvTI"))
    }

    #[tokio::test]
    async fn test_placeholder_news_leads_with_two_urgent_items() {
        let news = placeholder().breaking_news(None).await.unwrap();
        assert_eq!(news.len(), 4);
        assert!(news.iter().take(2).all(|n| n.priority == NewsPriority::Urgent));

        let limited = placeholder().breaking_news(Some(3)).await.unwrap();
        assert_eq!(limited.len(), 3);
    }

    #[tokio::test]
    async fn test_placeholder_live_uses_configured_video() {
        let live = PlaceholderSource::new(VideoId::new("abc123")).live().await.unwrap();
        assert_eq!(live.video_id.as_str(), "abc123");
        assert!(live.is_live);
        assert!(live.embed_url().contains("autoplay=1"));
    }

    #[tokio::test]
    async fn test_fallback_answers_every_call_from_placeholder() {
        let down = Arc::new(DownSource::default());
        let source = FallbackSource::new(down.clone(), placeholder());

        assert_eq!(source.latest_videos(50).await.unwrap().len(), 2);
        assert_eq!(source.journal(30).await.unwrap()[0].id.as_str(), "zjWu0nZyBCY");
        assert!(source.live().await.unwrap().is_live);
        assert!(!source.breaking_news(Some(3)).await.unwrap().is_empty());
        assert!(source.comments(&VideoId::new("zjWu0nZyBCY")).await.unwrap().is_empty());
        assert_eq!(down.calls.load(Ordering::SeqCst), 5);
    }
}
