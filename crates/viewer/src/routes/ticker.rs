//! Ticker fragment, mounted by every page through `hx-trigger="load"`.

use std::time::Instant;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use lca_tv_core::ticker::{FEED_LIMIT, Ticker, TickerRender, items_from_feed};

use crate::state::AppState;

/// Width the strip starts from, in pixels.
pub const VIEWPORT_WIDTH: f64 = 1024.0;

#[derive(Template, WebTemplate)]
#[template(path = "_ticker.html")]
pub struct TickerTemplate {
    pub ticker: Option<TickerRender>,
}

/// GET /ticker
///
/// Always a fresh feed read; a failed or empty feed shows the built-in items.
pub async fn fragment(State(state): State<AppState>) -> TickerTemplate {
    let feed = state
        .feed()
        .breaking_news(u32::try_from(FEED_LIMIT).ok())
        .await;
    if let Err(e) = &feed {
        tracing::warn!(error = %e, "Ticker feed unavailable, using fallback");
    }

    let mut ticker = Ticker::new(VIEWPORT_WIDTH);
    ticker.load(items_from_feed(&feed), Instant::now());
    TickerTemplate {
        ticker: ticker.render(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::{Arc, Mutex};

    use lca_tv_client::ClientConfig;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::config::ViewerConfig;

    /// Records the level of every event emitted by this module.
    #[derive(Clone, Default)]
    struct Levels(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for Levels {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if event.metadata().module_path() == Some(module_path!().trim_end_matches("::tests")) {
                self.0.lock().unwrap().push(*event.metadata().level());
            }
        }
    }

    /// A backend address nothing listens on.
    fn closed_backend() -> ClientConfig {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        ClientConfig::new(&format!("http://{addr}/api")).unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_feed_warns_and_falls_back() {
        let levels = Levels::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(levels.clone()));
        let state = AppState::new(ViewerConfig::local(closed_backend())).unwrap();

        let template = fragment(State(state)).await;

        let render = template.ticker.unwrap();
        assert_eq!(render.entries[0].id, "fallback-1");
        assert_eq!(*levels.0.lock().unwrap(), [Level::WARN]);
    }
}
