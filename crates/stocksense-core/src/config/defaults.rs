//! Named defaults shared by the config structs and their `Default` impls.

use crate::constants::MAX_RECENT_OBSERVATIONS;

// Consensus
pub const DEFAULT_MAX_OBSERVATIONS: usize = MAX_RECENT_OBSERVATIONS;
pub const DEFAULT_DECAY_FLOOR: f64 = 0.2;
pub const DEFAULT_DECAY_HORIZON_HOURS: f64 = 72.0;
pub const DEFAULT_SATURATION_WEIGHT: f64 = 5.0;

// Search
pub const DEFAULT_SEARCH_LIMIT: usize = 15;
pub const MAX_SEARCH_LIMIT: usize = 50;
pub const DEFAULT_SUGGEST_LIMIT: usize = 10;

// Admission (per-route policies)
pub const DEFAULT_REPORTS_LIMIT: usize = 20;
pub const DEFAULT_AVAILABILITY_LIMIT: usize = 60;
pub const DEFAULT_WINDOW_SECS: u64 = 60;

// Storage
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
