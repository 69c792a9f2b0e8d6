//! Breaking news list with a priority filter.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use lca_tv_core::NewsPriority;
use serde::Deserialize;
use tracing::instrument;

use super::{NewsRow, Page};
use crate::error::AppError;
use crate::filters;
use crate::middleware::Visitor;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    pub priority: Option<String>,
}

/// Filter chip; `key` is empty for "all".
#[derive(Debug, Clone)]
pub struct PriorityChip {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub active: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "breaking_news.html")]
pub struct NewsTemplate {
    pub page: Page,
    pub chips: Vec<PriorityChip>,
    pub news: Vec<NewsRow>,
}

/// GET /breaking-news
///
/// An unknown `priority` shows everything.
#[instrument(skip(visitor, state))]
pub async fn index(
    visitor: Visitor,
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<NewsTemplate, AppError> {
    let selected: Option<NewsPriority> = query.priority.as_deref().and_then(|p| p.parse().ok());

    let (all, error) = match state.content().breaking_news(None).await {
        Ok(news) => (news, None),
        Err(e) => {
            tracing::warn!(error = %e, "Breaking news unavailable");
            (Vec::new(), Some(e.user_message()))
        }
    };
    let active: Vec<_> = all.iter().filter(|n| n.is_active).collect();

    let mut chips = vec![PriorityChip {
        key: "",
        label: "Tous",
        count: active.len(),
        active: selected.is_none(),
    }];
    chips.extend(NewsPriority::ALL.iter().map(|p| PriorityChip {
        key: p.as_str(),
        label: p.label(),
        count: active.iter().filter(|n| n.priority == *p).count(),
        active: selected == Some(*p),
    }));

    Ok(NewsTemplate {
        page: Page::load(&visitor, "/breaking-news").await?.with_error(error),
        chips,
        news: NewsRow::all(
            active
                .into_iter()
                .filter(|n| selected.is_none_or(|p| n.priority == p)),
        ),
    })
}
