//! Per-observation weight factors. Pure functions over explicit time.

use chrono::{DateTime, Utc};

use stocksense_core::config::ConsensusConfig;
use stocksense_core::models::Observation;

/// Linear age decay: `1 − age/horizon`, floored.
///
/// Range: `floor` – 1.0. A future-dated observation (negative age, clock
/// skew or a sloppy import) counts at full weight, never more.
pub fn decay_factor(age_hours: f64, floor: f64, horizon_hours: f64) -> f64 {
    (1.0 - age_hours / horizon_hours).clamp(floor, 1.0)
}

/// Hours elapsed between an observation and `now`. Negative when the
/// observation is future-dated.
pub fn age_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - created_at).num_milliseconds() as f64 / 3_600_000.0
}

/// Full contribution of one observation: source trust × age decay.
pub fn observation_weight(
    observation: &Observation,
    now: DateTime<Utc>,
    config: &ConsensusConfig,
) -> f64 {
    let age = age_hours(observation.created_at, now);
    observation.source.weight() * decay_factor(age, config.decay_floor, config.decay_horizon_hours)
}
