use serde::{Deserialize, Serialize};

use super::defaults;

/// Consensus subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// How many of the most recent observations feed a recompute.
    pub max_observations: usize,
    /// Decay never discounts an observation below this fraction of its
    /// source weight.
    pub decay_floor: f64,
    /// Hours over which an observation decays linearly to the floor.
    pub decay_horizon_hours: f64,
    /// Winning-bucket weight at which confidence saturates to 1.0.
    pub saturation_weight: f64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            max_observations: defaults::DEFAULT_MAX_OBSERVATIONS,
            decay_floor: defaults::DEFAULT_DECAY_FLOOR,
            decay_horizon_hours: defaults::DEFAULT_DECAY_HORIZON_HOURS,
            saturation_weight: defaults::DEFAULT_SATURATION_WEIGHT,
        }
    }
}
