//! Concurrent sliding-window limiter keyed per (route, caller, policy).

use std::time::{Duration, Instant};

use dashmap::DashMap;

use stocksense_core::config::RoutePolicy;
use stocksense_core::errors::{StockError, StockResult};

/// One tracked window: admitted-call instants for a route/caller/policy
/// combination. The policy is part of the key, so retuning a route's limits
/// at runtime starts fresh windows instead of reinterpreting old ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WindowKey {
    route: String,
    caller: String,
    limit: usize,
    window_secs: u64,
}

/// Thread-safe sliding-window limiter.
///
/// The DashMap entry guard is held across prune, check, and record, so the
/// decision and its recording are atomic per key: two racing calls for the
/// same caller can never both slip under the limit. An admitted call is
/// recorded; a rejected call leaves the window untouched.
pub struct AdmissionLimiter {
    windows: DashMap<WindowKey, Vec<Instant>>,
}

impl AdmissionLimiter {
    /// Create a new limiter with no tracked windows.
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    /// Admit or reject a call right now.
    pub fn admit(&self, route: &str, caller: &str, policy: RoutePolicy) -> StockResult<()> {
        self.admit_at(route, caller, policy, Instant::now())
    }

    /// Admit or reject a call at an explicit instant. `now` must not move
    /// backwards for a given key.
    pub fn admit_at(
        &self,
        route: &str,
        caller: &str,
        policy: RoutePolicy,
        now: Instant,
    ) -> StockResult<()> {
        let key = WindowKey {
            route: route.to_string(),
            caller: caller.to_string(),
            limit: policy.limit,
            window_secs: policy.window_secs,
        };
        let mut window = self.windows.entry(key).or_default();

        // A call exactly one window old has aged out.
        window.retain(|t| now.duration_since(*t) < policy.window());

        if window.len() >= policy.limit {
            tracing::warn!(route, caller, limit = policy.limit, "admission rejected");
            return Err(StockError::RateLimited {
                route: route.to_string(),
            });
        }
        window.push(now);
        Ok(())
    }

    /// Drop windows whose newest admitted call is older than `idle_for`.
    /// Keeps long-lived processes from accumulating one entry per caller
    /// ever seen.
    pub fn purge_idle(&self, idle_for: Duration) -> usize {
        self.purge_idle_at(idle_for, Instant::now())
    }

    /// [`purge_idle`](Self::purge_idle) against an explicit instant.
    pub fn purge_idle_at(&self, idle_for: Duration, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, window| {
            window
                .last()
                .is_some_and(|newest| now.duration_since(*newest) < idle_for)
        });
        before - self.windows.len()
    }

    /// Number of windows currently tracked.
    pub fn tracked_windows(&self) -> usize {
        self.windows.len()
    }
}

impl Default for AdmissionLimiter {
    fn default() -> Self {
        Self::new()
    }
}
