//! Viewer-facing content DTOs: videos, comments, live stream, breaking news.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::format::{format_duration, format_view_count, parse_count};
use crate::types::{CommentId, NewsId, NewsPriority, VideoId};

/// A YouTube video from the channel feed.
///
/// Counts and duration arrive as strings exactly as YouTube reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub view_count: String,
    #[serde(default)]
    pub like_count: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub category: String,
}

impl Video {
    /// Numeric view count (0 if unparseable).
    #[must_use]
    pub fn views(&self) -> u64 {
        parse_count(&self.view_count)
    }

    /// Compact view count for display.
    #[must_use]
    pub fn views_display(&self) -> String {
        format_view_count(&self.view_count)
    }

    /// Human-readable duration.
    #[must_use]
    pub fn duration_display(&self) -> String {
        format_duration(&self.duration)
    }

    /// Privacy-friendly embed URL.
    #[must_use]
    pub fn embed_url(&self) -> String {
        embed_url(self.id.as_str(), false)
    }
}

/// Build a YouTube embed URL for a video id.
#[must_use]
pub fn embed_url(video_id: &str, autoplay: bool) -> String {
    format!(
        "https://www.youtube.com/embed/{video_id}?autoplay={}&rel=0&modestbranding=1",
        u8::from(autoplay)
    )
}

/// A viewer comment on a video, as listed by `GET /videos/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoComment {
    pub id: CommentId,
    pub video_id: VideoId,
    pub content: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: u64,
    /// Relative age computed by the backend ("Il y a 5 min").
    #[serde(default)]
    pub time_ago: Option<String>,
}

/// Body of `POST /videos/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub video_id: VideoId,
    pub content: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Response of `PUT /comments/{id}/like`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentLikes {
    pub likes: u64,
}

/// The channel's current live broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStream {
    pub video_id: VideoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub is_live: bool,
}

impl LiveStream {
    /// Autoplaying embed URL for the live player.
    #[must_use]
    pub fn embed_url(&self) -> String {
        embed_url(self.video_id.as_str(), true)
    }
}

/// A breaking news entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingNews {
    /// The backend sometimes omits ids; an empty id is valid.
    #[serde(default)]
    pub id: NewsId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub priority: NewsPriority,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub category: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for NewsId {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    /// True when the backend reports itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_breaking_news_minimal_shape() {
        let json = r#"[{"title": "Coupure d'électricité à Bobo", "created_at": "2024-06-01T07:00:00"}]"#;
        let news: Vec<BreakingNews> = serde_json::from_str(json).unwrap();
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].priority, NewsPriority::Normal);
        assert!(news[0].id.as_str().is_empty());
        assert!(news[0].is_active);
    }

    #[test]
    fn test_video_display_helpers() {
        let video = Video {
            id: VideoId::new("zjWu0nZyBCY"),
            title: "Journal LCA TV - Édition du Soir".to_string(),
            description: String::new(),
            thumbnail: String::new(),
            published_at: "2024-12-14T19:00:00Z".to_string(),
            view_count: "25420".to_string(),
            like_count: "324".to_string(),
            duration: "PT30M45S".to_string(),
            category: "actualites".to_string(),
        };
        assert_eq!(video.views(), 25_420);
        assert_eq!(video.views_display(), "25.4K");
        assert_eq!(video.duration_display(), "30:45");
        assert!(video.embed_url().starts_with("https://www.youtube.com/embed/zjWu0nZyBCY"));
    }

    #[test]
    fn test_comment_list_shape() {
        let json = r#"[{
            "id": "c-1",
            "video_id": "zjWu0nZyBCY",
            "content": "Très bon reportage",
            "user_name": "Awa",
            "created_at": "2024-12-14T19:05:00",
            "likes": 3,
            "time_ago": "Il y a 2h"
        }, {
            "id": "c-2",
            "video_id": "zjWu0nZyBCY",
            "content": "Merci"
        }]"#;
        let comments: Vec<VideoComment> = serde_json::from_str(json).unwrap();
        assert_eq!(comments[0].likes, 3);
        assert_eq!(comments[0].time_ago.as_deref(), Some("Il y a 2h"));
        assert!(comments[0].created_at.is_some());
        assert_eq!(comments[1].likes, 0);
        assert!(comments[1].created_at.is_none());
    }

    #[test]
    fn test_new_comment_omits_missing_email() {
        let comment = NewComment {
            video_id: VideoId::new("zjWu0nZyBCY"),
            content: "Bravo".to_string(),
            user_name: "Awa".to_string(),
            user_email: None,
        };
        let value = serde_json::to_value(&comment).unwrap();
        assert!(value.get("user_email").is_none());
        assert_eq!(value["video_id"], "zjWu0nZyBCY");
    }

    #[test]
    fn test_health() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status":"healthy","version":"1.0.0"}"#).unwrap();
        assert!(health.is_healthy());
    }
}
