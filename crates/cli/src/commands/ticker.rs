//! Breaking news marquee drawn on one terminal line.
//!
//! The strip geometry comes from [`Ticker`] in pixels; the terminal scales
//! it down by [`PX_PER_COLUMN`] so one item occupies a fixed run of columns.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use lca_tv_core::format::truncate;
use lca_tv_core::ticker::{FEED_LIMIT, ITEM_WIDTH, LABEL, Ticker, TickerRender, items_from_feed};

use super::Context;
use crate::error::CliError;

/// Pixels represented by one terminal column.
pub const PX_PER_COLUMN: f64 = 10.0;

const FRAME_INTERVAL: Duration = Duration::from_millis(100);

#[allow(clippy::cast_possible_truncation)]
const FEED_LIMIT_U32: u32 = FEED_LIMIT as u32;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const ITEM_COLUMNS: usize = (ITEM_WIDTH / PX_PER_COLUMN) as usize;

fn label(text: &str) -> String {
    format!(" {text} │ ")
}

/// Both copies of the strip, each entry padded to its column run.
fn strip(render: &TickerRender) -> Vec<char> {
    render
        .entries
        .iter()
        .flat_map(|entry| {
            let text = truncate(&format!("{} {}", entry.icon.glyph(), entry.text), ITEM_COLUMNS - 6);
            let cell = if entry.separator {
                format!("{text}  •  ")
            } else {
                format!("{text}     ")
            };
            let pad = ITEM_COLUMNS.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad)).chars().collect::<Vec<_>>()
        })
        .collect()
}

/// Columns left for the scrolling lane once the label is drawn.
fn lane_width(render_label: &str, width: u16) -> usize {
    usize::from(width).saturating_sub(render_label.chars().count())
}

/// One frame: the fixed label, then the lane with the strip shifted by
/// `offset` pixels.
#[allow(clippy::cast_possible_truncation)]
fn frame(render: &TickerRender, offset: f64, width: u16) -> String {
    let label = label(render.label);
    let lane = lane_width(&label, width);
    let strip = strip(render);
    let shift = (offset / PX_PER_COLUMN).round() as i64;

    let mut line = label;
    for column in 0..lane {
        let index = i64::try_from(column).unwrap_or(i64::MAX) - shift;
        let c = usize::try_from(index)
            .ok()
            .and_then(|i| strip.get(i).copied())
            .unwrap_or(' ');
        line.push(c);
    }
    line
}

/// Fetch the feed and scroll until interrupted. With `once`, print the
/// strip as a single line instead.
///
/// # Errors
///
/// Returns an error if stdout is closed. Feed failures fall back to the
/// static strip.
pub async fn run(ctx: &Context, width: u16, once: bool) -> Result<(), CliError> {
    let feed = ctx.public_api()?.content().breaking_news(Some(FEED_LIMIT_U32)).await;
    if let Err(e) = &feed {
        tracing::warn!(error = %e, "Breaking news unavailable, using fallback strip");
    }

    let mut ticker = Ticker::new(lane_width_px(width));
    ticker.load(items_from_feed(&feed), Instant::now());

    let Some(render) = ticker.render() else {
        return Ok(());
    };
    if once {
        println!("{}", render.line());
        return Ok(());
    }

    let mut interval = tokio::time::interval(FRAME_INTERVAL);
    let mut out = io::stdout();
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }
        let now = Instant::now();
        let cycles = ticker.tick(now);
        if cycles > 0 {
            tracing::trace!(cycles, "Ticker cycle restarted");
        }
        write!(out, "\r{}", frame(&render, ticker.offset_at(now), width))?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

/// Lane width in the ticker's pixel units.
#[allow(clippy::cast_precision_loss)]
fn lane_width_px(width: u16) -> f64 {
    lane_width(&label(LABEL), width) as f64 * PX_PER_COLUMN
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lca_tv_core::ticker::fallback_items;

    use super::*;

    fn fallback_render(width: u16) -> TickerRender {
        let mut ticker = Ticker::new(lane_width_px(width));
        ticker.load(fallback_items(), Instant::now());
        ticker.render().unwrap()
    }

    #[test]
    fn test_frame_starts_with_an_empty_lane() {
        let render = fallback_render(80);
        let line = frame(&render, render.start_offset, 80);

        assert!(line.starts_with(" DIRECT │ "));
        assert_eq!(line.chars().count(), 80);
        assert!(line.trim_end().ends_with('│'));
    }

    #[test]
    fn test_frame_at_zero_offset_shows_first_item() {
        let render = fallback_render(80);
        let line = frame(&render, 0.0, 80);

        assert!(line.contains("⚡ 🔴 URGENT"));
    }

    #[test]
    fn test_frame_at_end_offset_has_scrolled_past_one_copy() {
        let render = fallback_render(80);
        let line = frame(&render, render.end_offset, 80);

        // Past the first copy: the duplicate copy fills the lane.
        assert!(!line.trim_end().ends_with('│'));
    }
}
