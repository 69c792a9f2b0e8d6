//! Read-query cache.
//!
//! [`QueryClient`] memoizes read results for five minutes under typed
//! [`QueryKey`]s, retries failed loads per [`RetryPolicy`], and hands out
//! [`QueryWatch`]es for views that refresh on an interval. Mutations call
//! [`QueryClient::invalidate`] for the lists they affect.

mod retry;
mod watch;

pub use retry::{DEFAULT_MAX_RETRIES, RetryPolicy};
pub use watch::{MAX_CONSECUTIVE_FAILURES, QueryWatch, STATS_REFRESH_INTERVAL, WatchState};

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use lca_tv_core::ClientId;
use moka::future::Cache;
use tracing::debug;

use crate::error::Result;

/// Lifetime of a cached read.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
const MAX_ENTRIES: u64 = 1000;

/// Identity of a cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    DashboardStats,
    RevenueAnalytics,
    PerformanceAnalytics,
    Clients,
    Client(ClientId),
    AdSpaces,
    Orders,
    Users,
    LatestVideos(u32),
    Journal(u32),
    LiveStream,
    BreakingNews(Option<u32>),
}

impl QueryKey {
    /// Keys whose cached value a mutation of this key's list makes stale.
    #[must_use]
    pub fn dependents(&self) -> Vec<Self> {
        match self {
            Self::Clients => vec![Self::Clients, Self::DashboardStats],
            Self::Client(id) => vec![
                Self::Client(id.clone()),
                Self::Clients,
                Self::DashboardStats,
            ],
            Self::Orders => vec![
                Self::Orders,
                Self::DashboardStats,
                Self::RevenueAnalytics,
                Self::PerformanceAnalytics,
            ],
            other => vec![other.clone()],
        }
    }
}

type Entry = Arc<dyn Any + Send + Sync>;

/// Shared cache of read results. Cheap to clone.
#[derive(Clone)]
pub struct QueryClient {
    cache: Cache<QueryKey, Entry>,
    retry: RetryPolicy,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, RetryPolicy::default())
    }
}

impl QueryClient {
    #[must_use]
    pub fn new(ttl: Duration, retry: RetryPolicy) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self { cache, retry }
    }

    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Cached value for `key`, or the result of `load` (retried per policy)
    /// which is then cached. Failures are not cached.
    ///
    /// # Errors
    ///
    /// Returns the loader's last error.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.peek::<T>(&key).await {
            debug!(?key, "Query cache hit");
            return Ok(hit);
        }
        self.load(key, load, self.retry).await
    }

    /// Bypass the cache, load once more, and cache the result.
    ///
    /// # Errors
    ///
    /// Returns the loader's last error.
    pub async fn refetch<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.load(key, load, self.retry).await
    }

    /// One unretried load, cached on success. Used by pollers that count
    /// their own failures.
    ///
    /// # Errors
    ///
    /// Returns the loader's error.
    pub async fn poll<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.load(key, load, RetryPolicy::none()).await
    }

    /// Cached value for `key` without loading.
    pub async fn peek<T: Clone + Send + Sync + 'static>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.cache.get(key).await?;
        entry.downcast_ref::<T>().cloned()
    }

    /// Poll `load` on `period` through the cache. Each poll is a single
    /// attempt; the watch itself counts consecutive failures.
    #[must_use]
    pub fn watch<T, F, Fut>(&self, key: QueryKey, period: Duration, load: F) -> QueryWatch<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let this = self.clone();
        let load = Arc::new(load);
        QueryWatch::spawn(period, move || {
            let this = this.clone();
            let key = key.clone();
            let load = Arc::clone(&load);
            async move { this.poll(key, || (*load)()).await }
        })
    }

    /// Drop `key` and everything that depends on it.
    pub async fn invalidate(&self, key: &QueryKey) {
        for dependent in key.dependents() {
            self.cache.invalidate(&dependent).await;
        }
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    async fn load<T, F, Fut>(&self, key: QueryKey, load: F, policy: RetryPolicy) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let value = policy.run(load).await?;
        let entry: Entry = Arc::new(value.clone());
        self.cache.insert(key, entry).await;
        Ok(value)
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.cache.entry_count())
            .field("retry", &self.retry)
            .finish()
    }
}
