//! HTML rendition of the breaking-news ticker.
//!
//! The scroll itself is a CSS keyframe animation between the start and end
//! offsets of [`TickerRender`]; the browser loops it, which is the
//! "complete, reset, relaunch" cycle.

use std::time::Instant;

use lca_tv_core::models::BreakingNews;
use lca_tv_core::ticker::{Ticker, TickerRender, items_from_feed};

/// Viewport width assumed for server-rendered offsets, in pixels.
pub const VIEWPORT_WIDTH: f64 = 1280.0;

/// One drawn item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerEntryView {
    pub id: String,
    pub kind: &'static str,
    pub icon: &'static str,
    pub text: String,
    pub separator: bool,
}

/// Template data for the ticker strip.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerView {
    pub label: &'static str,
    pub entries: Vec<TickerEntryView>,
    pub duration_secs: u64,
    pub start_px: i64,
    pub end_px: i64,
}

impl TickerView {
    /// Mount a ticker over a feed result; failures fall back to the
    /// built-in items.
    #[must_use]
    pub fn from_feed<E>(feed: &Result<Vec<BreakingNews>, E>) -> Option<Self> {
        let mut ticker = Ticker::new(VIEWPORT_WIDTH);
        ticker.load(items_from_feed(feed), Instant::now());
        ticker.render().as_ref().map(Self::from)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl From<&TickerRender> for TickerView {
    fn from(render: &TickerRender) -> Self {
        Self {
            label: render.label,
            entries: render
                .entries
                .iter()
                .map(|e| TickerEntryView {
                    id: e.id.clone(),
                    kind: e.kind.as_str(),
                    icon: e.icon.glyph(),
                    text: e.text.clone(),
                    separator: e.separator,
                })
                .collect(),
            duration_secs: render.duration_secs,
            start_px: render.start_offset.round() as i64,
            end_px: render.end_offset.round() as i64,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lca_tv_core::ticker::fallback_items;

    use super::*;

    #[test]
    fn test_failed_feed_still_renders_fallback() {
        let feed: Result<Vec<BreakingNews>, &str> = Err("connection refused");
        let view = TickerView::from_feed(&feed).unwrap();

        assert_eq!(view.entries.len(), fallback_items().len() * 2);
        assert_eq!(view.duration_secs, 36);
        assert_eq!(view.start_px, 1280);
        assert!(view.end_px < 0);
    }
}
