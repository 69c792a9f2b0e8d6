//! Breaking-news ticker state machine.
//!
//! The ticker scrolls a strip of short items from the right edge of the
//! viewport until the whole strip has left on the left, then snaps back and
//! starts over, forever. The strip is rendered twice back to back so the
//! second copy is already on screen while the first one leaves.
//!
//! The machine has two phases, [`Phase::Idle`] and [`Phase::Animating`].
//! Offsets are derived from elapsed time ([`Ticker::offset_at`]) rather
//! than mutated per frame, so any renderer (CSS keyframes, a terminal redraw
//! loop) can sample it.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use lca_tv_core::ticker::{Ticker, fallback_items};
//!
//! let start = Instant::now();
//! let mut ticker = Ticker::new(800.0);
//! ticker.load(fallback_items(), start);
//!
//! assert_eq!(ticker.cycle_duration(), Duration::from_secs(36));
//! assert_eq!(ticker.offset_at(start), 800.0);
//!
//! ticker.dismiss();
//! assert!(ticker.render().is_none());
//! ```

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::models::BreakingNews;

/// Horizontal space reserved per item, in pixels (or terminal columns for
/// text renderers that scale it down).
pub const ITEM_WIDTH: f64 = 500.0;
/// Scroll time per item.
pub const PER_ITEM: Duration = Duration::from_secs(12);
/// Number of breaking-news entries requested from the feed.
pub const FEED_LIMIT: usize = 3;
/// At most this many news items are shown.
pub const MAX_NEWS_ITEMS: usize = 2;
/// Badge shown at the left of the strip.
pub const LABEL: &str = "DIRECT";
/// Suffix of the ids in the second copy of the strip.
pub const DUPLICATE_SUFFIX: &str = "-duplicate";

/// What an item talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickerKind {
    News,
    Weather,
    Market,
}

impl TickerKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Weather => "weather",
            Self::Market => "market",
        }
    }
}

/// Icon drawn before an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickerIcon {
    Flash,
    Sunny,
    TrendingUp,
    BarChart,
}

impl TickerIcon {
    /// Icon name used as a CSS class.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Flash => "flash",
            Self::Sunny => "sunny",
            Self::TrendingUp => "trending-up",
            Self::BarChart => "bar-chart",
        }
    }

    /// Single-glyph rendition for text output.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Flash => "⚡",
            Self::Sunny => "☀",
            Self::TrendingUp => "↗",
            Self::BarChart => "▤",
        }
    }
}

/// One display unit of the strip. Recreated on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerItem {
    pub id: String,
    pub kind: TickerKind,
    pub text: String,
    pub icon: TickerIcon,
}

impl TickerItem {
    fn new(id: impl Into<String>, kind: TickerKind, text: impl Into<String>, icon: TickerIcon) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
            icon,
        }
    }
}

// =============================================================================
// Item lists
// =============================================================================

/// Build the strip from a successful feed response.
///
/// The first [`MAX_NEWS_ITEMS`] entries are flagged urgent, followed by the
/// weather item and the two market items. The result always has at least
/// three items.
#[must_use]
pub fn items_from_news(news: &[BreakingNews]) -> Vec<TickerItem> {
    let mut items: Vec<TickerItem> = news
        .iter()
        .take(MAX_NEWS_ITEMS)
        .enumerate()
        .map(|(i, n)| {
            TickerItem::new(
                format!("news-{i}"),
                TickerKind::News,
                format!("🔴 URGENT: {}", n.title),
                TickerIcon::Flash,
            )
        })
        .collect();

    // Weather and markets are static until a real feed is wired in.
    items.push(TickerItem::new(
        "weather-1",
        TickerKind::Weather,
        "🌤️ OUAGADOUGOU: 32°C - Ensoleillé avec quelques nuages - Vent: 15 km/h",
        TickerIcon::Sunny,
    ));
    items.push(TickerItem::new(
        "market-1",
        TickerKind::Market,
        "📈 MARCHÉ: FCFA/USD: 590.25 (+0.15%) - Or: 1,950$/oz (+1.2%) - Coton: 82.50 FCFA/kg",
        TickerIcon::TrendingUp,
    ));
    items.push(TickerItem::new(
        "market-2",
        TickerKind::Market,
        "📊 BOURSE: BRVM +2.1% - Total Sénégal: +3.4% - Sonatel: +1.8% - BOA: +0.9%",
        TickerIcon::BarChart,
    ));
    items
}

/// Strip used when the feed cannot be fetched.
#[must_use]
pub fn fallback_items() -> Vec<TickerItem> {
    vec![
        TickerItem::new(
            "fallback-1",
            TickerKind::News,
            "🔴 URGENT: Suivez l'actualité en temps réel sur LCA TV",
            TickerIcon::Flash,
        ),
        TickerItem::new(
            "fallback-2",
            TickerKind::Weather,
            "🌤️ OUAGADOUGOU: Temps clément - Restez informés",
            TickerIcon::Sunny,
        ),
        TickerItem::new(
            "fallback-3",
            TickerKind::Market,
            "📈 MARCHÉ: FCFA/USD stable - Marchés ouverts",
            TickerIcon::TrendingUp,
        ),
    ]
}

/// Strip for any feed outcome. Failures fall back silently.
#[must_use]
pub fn items_from_feed<E>(feed: &Result<Vec<BreakingNews>, E>) -> Vec<TickerItem> {
    match feed {
        Ok(news) => items_from_news(news),
        Err(_) => fallback_items(),
    }
}

// =============================================================================
// State machine
// =============================================================================

/// Animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing scrolling: not loaded yet, or dismissed.
    Idle,
    /// The current cycle started at `started_at`.
    Animating { started_at: Instant },
}

/// A mounted ticker.
#[derive(Debug, Clone)]
pub struct Ticker {
    items: Vec<TickerItem>,
    viewport_width: f64,
    visible: bool,
    phase: Phase,
}

impl Ticker {
    /// An empty, visible, idle ticker for a viewport of the given width.
    #[must_use]
    pub fn new(viewport_width: f64) -> Self {
        Self {
            items: Vec::new(),
            viewport_width: viewport_width.max(0.0),
            visible: true,
            phase: Phase::Idle,
        }
    }

    /// Install the strip and, if it is non-empty and the ticker is still
    /// visible, start scrolling at `now`.
    pub fn load(&mut self, items: Vec<TickerItem>, now: Instant) {
        self.items = items;
        if self.visible && !self.items.is_empty() {
            self.phase = Phase::Animating { started_at: now };
        } else {
            self.phase = Phase::Idle;
        }
    }

    #[must_use]
    pub fn items(&self) -> &[TickerItem] {
        &self.items
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Length of one full scroll: [`PER_ITEM`] per item.
    #[must_use]
    pub fn cycle_duration(&self) -> Duration {
        PER_ITEM * u32::try_from(self.items.len()).unwrap_or(u32::MAX)
    }

    /// Offset at the start of each cycle: one viewport to the right.
    #[must_use]
    pub const fn start_offset(&self) -> f64 {
        self.viewport_width
    }

    /// Offset at the end of each cycle: the whole strip is off to the left.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn end_offset(&self) -> f64 {
        -(self.viewport_width + self.items.len() as f64 * ITEM_WIDTH)
    }

    /// Offset of the strip at `now`.
    ///
    /// Linear within a cycle; completed cycles wrap back to the start, which
    /// is the "complete, reset, relaunch" rule applied analytically.
    #[must_use]
    pub fn offset_at(&self, now: Instant) -> f64 {
        let Phase::Animating { started_at } = self.phase else {
            return self.start_offset();
        };
        let cycle = self.cycle_duration();
        if cycle.is_zero() {
            return self.start_offset();
        }
        let elapsed = now.saturating_duration_since(started_at);
        let progress = (elapsed.as_secs_f64() % cycle.as_secs_f64()) / cycle.as_secs_f64();
        self.start_offset() + (self.end_offset() - self.start_offset()) * progress
    }

    /// Apply the transition rule at `now`: every finished cycle resets the
    /// offset and relaunches. Returns the number of cycles completed.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let Phase::Animating { started_at } = self.phase else {
            return 0;
        };
        let cycle = self.cycle_duration();
        if cycle.is_zero() {
            return 0;
        }
        let mut started_at = started_at;
        let mut completed = 0;
        while now.saturating_duration_since(started_at) >= cycle {
            started_at += cycle;
            completed += 1;
        }
        self.phase = Phase::Animating { started_at };
        completed
    }

    /// Hide the ticker for good and abandon the animation.
    pub fn dismiss(&mut self) {
        self.visible = false;
        self.phase = Phase::Idle;
    }

    /// The strip to draw, or `None` when dismissed or still empty.
    #[must_use]
    pub fn render(&self) -> Option<TickerRender> {
        if !self.visible || self.items.is_empty() {
            return None;
        }
        let entries = strip_copy(&self.items, "")
            .chain(strip_copy(&self.items, DUPLICATE_SUFFIX))
            .collect();
        Some(TickerRender {
            label: LABEL,
            entries,
            duration_secs: self.cycle_duration().as_secs(),
            start_offset: self.start_offset(),
            end_offset: self.end_offset(),
        })
    }
}

/// One pass over `items`, with `suffix` appended to every id.
fn strip_copy<'a>(
    items: &'a [TickerItem],
    suffix: &'a str,
) -> impl Iterator<Item = TickerEntry> + 'a {
    let last = items.len().saturating_sub(1);
    items.iter().enumerate().map(move |(i, item)| TickerEntry {
        id: format!("{}{suffix}", item.id),
        kind: item.kind,
        text: item.text.clone(),
        icon: item.icon,
        separator: i < last,
    })
}

/// One drawn item; `separator` marks a dot after it within its copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerEntry {
    pub id: String,
    pub kind: TickerKind,
    pub text: String,
    pub icon: TickerIcon,
    pub separator: bool,
}

/// Everything a renderer needs for one mounted ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerRender {
    pub label: &'static str,
    /// The strip twice, back to back.
    pub entries: Vec<TickerEntry>,
    pub duration_secs: u64,
    pub start_offset: f64,
    pub end_offset: f64,
}

impl TickerRender {
    /// The strip as a single line of text (one copy).
    #[must_use]
    pub fn line(&self) -> String {
        let half = self.entries.len() / 2;
        self.entries
            .iter()
            .take(half)
            .map(|e| format!("{} {}", e.icon.glyph(), e.text))
            .collect::<Vec<_>>()
            .join("  •  ")
    }
}
