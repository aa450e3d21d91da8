//! Time-bounded memoization of the upstream category list.

use std::{
    sync::{Arc, RwLock},
    time::{Duration, Instant},
};

use crate::upstream::{JokeUpstream, UpstreamError};

/// How long a fetched category list stays fresh.
pub const CATEGORY_TTL: Duration = Duration::from_secs(10 * 60);

/// Time source, injectable so tests can control expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Cached {
    categories: Vec<String>,
    fetched_at: Instant,
}

/// TTL cache over the upstream category list.
///
/// A read within the TTL returns the stored list without touching the
/// upstream; a read at or past the TTL refetches and replaces both the value
/// and the timestamp. A failed refetch propagates to the caller and leaves
/// the stored state untouched, so the next read retries.
///
/// Known limitation: concurrent reads during a miss are not coalesced, so
/// each may trigger its own upstream fetch; the last writer wins.
pub struct CategoryCache<U> {
    upstream: Arc<U>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    cached: RwLock<Option<Cached>>,
}

impl<U: JokeUpstream> CategoryCache<U> {
    /// Create a cache with the default TTL and the wall clock.
    #[must_use]
    pub fn new(upstream: Arc<U>) -> Self {
        Self::with_ttl_and_clock(upstream, CATEGORY_TTL, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit TTL and clock.
    #[must_use]
    pub fn with_ttl_and_clock(upstream: Arc<U>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            upstream,
            ttl,
            clock,
            cached: RwLock::new(None),
        }
    }

    /// Current category list, fetched from the upstream at most once per TTL
    /// window.
    ///
    /// # Errors
    /// Returns the upstream error when a refetch fails; any previously cached
    /// list is retained for the next attempt.
    pub async fn get(&self) -> Result<Vec<String>, UpstreamError> {
        let now = self.clock.now();

        if let Some(cached) = self.cached.read().unwrap().as_ref() {
            if now.duration_since(cached.fetched_at) < self.ttl {
                return Ok(cached.categories.clone());
            }
        }

        let categories = self.upstream.categories().await?;
        tracing::debug!(count = categories.len(), "refreshed category cache");

        *self.cached.write().unwrap() = Some(Cached {
            categories: categories.clone(),
            fetched_at: self.clock.now(),
        });

        Ok(categories)
    }
}
