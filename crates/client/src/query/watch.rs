//! Background refresh bound to a view's lifetime.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::error::Result;

/// Refresh interval of the dashboard stats.
pub const STATS_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Consecutive failures after which a watch stops polling.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// What a [`QueryWatch`] last observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchState<T> {
    Loading,
    Ready(T),
    /// The last load failed; `failures` counts consecutive failures and
    /// `last` holds the most recent good value, if any.
    Failed {
        message: String,
        failures: u32,
        last: Option<T>,
    },
    /// Polling gave up after [`MAX_CONSECUTIVE_FAILURES`].
    Stopped { message: String, last: Option<T> },
    /// The backend answered 401. The session has been expired.
    Unauthorized,
}

impl<T> WatchState<T> {
    /// The freshest value available.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Failed { last, .. } | Self::Stopped { last, .. } => last.as_ref(),
            Self::Loading | Self::Unauthorized => None,
        }
    }

    /// True once the watch will publish nothing more.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped { .. } | Self::Unauthorized)
    }
}

/// A spawned poller publishing on a `tokio::sync::watch` channel.
///
/// Dropping the handle aborts the task, so no result is delivered after
/// the owning view is gone.
#[derive(Debug)]
pub struct QueryWatch<T> {
    rx: watch::Receiver<WatchState<T>>,
    task: JoinHandle<()>,
}

impl<T> QueryWatch<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Poll `load` now and then every `period`.
    #[must_use]
    pub fn spawn<F, Fut>(period: Duration, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(WatchState::Loading);
        let task = tokio::spawn(poll(period, load, tx));
        Self { rx, task }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn current(&self) -> WatchState<T> {
        self.rx.borrow().clone()
    }

    /// A receiver for callers that want to await changes themselves.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WatchState<T>> {
        self.rx.clone()
    }

    /// Wait for the next published state. Returns `None` once the poller
    /// has finished and nothing new will arrive.
    pub async fn changed(&mut self) -> Option<WatchState<T>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Drop for QueryWatch<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll<T, F, Fut>(period: Duration, load: F, tx: watch::Sender<WatchState<T>>)
where
    T: Clone,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut failures = 0;
    let mut last: Option<T> = None;

    loop {
        interval.tick().await;
        let result = load().await;
        match result {
            Ok(value) => {
                failures = 0;
                last = Some(value.clone());
                debug!("Watched query refreshed");
                tx.send_replace(WatchState::Ready(value));
            }
            Err(e) if e.is_unauthorized() => {
                tx.send_replace(WatchState::Unauthorized);
                return;
            }
            Err(e) => {
                failures += 1;
                let message = e.user_message();
                warn!(error = %e, failures, "Watched query failed");
                if failures >= MAX_CONSECUTIVE_FAILURES {
                    tx.send_replace(WatchState::Stopped { message, last });
                    return;
                }
                tx.send_replace(WatchState::Failed {
                    message,
                    failures,
                    last: last.clone(),
                });
            }
        }
    }
}
