//! The consensus formula: weighted bucket sums, strict-winner selection.
//!
//! ```text
//! weight(obs)   = sourceWeight(obs.source) × decay(age(obs))
//! bucket[s]     = Σ weight(obs) over considered obs with status s
//! winner        = first status (enum order) whose bucket no other strictly exceeds
//! confidence    = min(1, bucket[winner] / saturation)
//! lastVerified  = newest considered created_at
//! ```
//!
//! Only the newest `max_observations` observations are considered.

use chrono::{DateTime, Utc};

use stocksense_core::config::ConsensusConfig;
use stocksense_core::models::{Confidence, Observation, StockStatus};

use crate::weights;

/// The derived consensus for one pair at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub status: StockStatus,
    pub confidence: Confidence,
    pub last_verified_at: DateTime<Utc>,
}

/// Per-bucket sums behind a verdict, for debugging and observability.
#[derive(Debug, Clone)]
pub struct ConsensusBreakdown {
    /// How many observations actually fed the sums after the recency cap.
    pub considered: usize,
    /// Weighted sum per status, in enum order.
    pub bucket_sums: [(StockStatus, f64); 4],
    pub verdict: Option<Verdict>,
}

/// Derive a verdict from a pair's observations. Returns `None` when there is
/// nothing to derive from; callers leave any existing aggregate untouched in
/// that case.
pub fn compute(
    observations: &[Observation],
    now: DateTime<Utc>,
    config: &ConsensusConfig,
) -> Option<Verdict> {
    compute_breakdown(observations, now, config).verdict
}

/// Derive a verdict together with the per-bucket sums that produced it.
pub fn compute_breakdown(
    observations: &[Observation],
    now: DateTime<Utc>,
    config: &ConsensusConfig,
) -> ConsensusBreakdown {
    let considered = newest(observations, config.max_observations);

    let mut sums = [0.0f64; 4];
    let mut last_verified_at: Option<DateTime<Utc>> = None;
    for obs in &considered {
        sums[obs.status as usize] += weights::observation_weight(obs, now, config);
        if last_verified_at.map_or(true, |newest| obs.created_at > newest) {
            last_verified_at = Some(obs.created_at);
        }
    }

    let verdict = last_verified_at.map(|last_verified_at| {
        // Strictly-greater comparison: on a tie the earlier variant keeps
        // the win, so the scan order is the tie-break order.
        let mut status = StockStatus::ALL[0];
        let mut winning_sum = sums[status as usize];
        for candidate in StockStatus::ALL.into_iter().skip(1) {
            if sums[candidate as usize] > winning_sum {
                status = candidate;
                winning_sum = sums[candidate as usize];
            }
        }

        Verdict {
            status,
            confidence: Confidence::new((winning_sum / config.saturation_weight).min(1.0)),
            last_verified_at,
        }
    });

    ConsensusBreakdown {
        considered: considered.len(),
        bucket_sums: [
            (StockStatus::InStock, sums[0]),
            (StockStatus::Low, sums[1]),
            (StockStatus::Out, sums[2]),
            (StockStatus::Unknown, sums[3]),
        ],
        verdict,
    }
}

/// The newest `cap` observations, newest first. Sorting here keeps the
/// formula correct for callers that pass unordered slices; the id tie-break
/// matches the storage ordering, so equal timestamps at the cap boundary
/// still select the same subset every time.
fn newest(observations: &[Observation], cap: usize) -> Vec<&Observation> {
    let mut sorted: Vec<&Observation> = observations.iter().collect();
    sorted.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    sorted.truncate(cap);
    sorted
}
