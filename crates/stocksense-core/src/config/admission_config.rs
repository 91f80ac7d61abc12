use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// One route's admission policy: at most `limit` admitted calls per caller
/// within a trailing `window_secs` interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoutePolicy {
    pub limit: usize,
    pub window_secs: u64,
}

impl RoutePolicy {
    pub fn new(limit: usize, window_secs: u64) -> Self {
        Self { limit, window_secs }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Admission subsystem configuration: per-route policies for the write
/// entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Public report submissions.
    pub reports: RoutePolicy,
    /// Staff availability updates.
    pub availability: RoutePolicy,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            reports: RoutePolicy::new(
                defaults::DEFAULT_REPORTS_LIMIT,
                defaults::DEFAULT_WINDOW_SECS,
            ),
            availability: RoutePolicy::new(
                defaults::DEFAULT_AVAILABILITY_LIMIT,
                defaults::DEFAULT_WINDOW_SECS,
            ),
        }
    }
}
