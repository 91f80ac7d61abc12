use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use super::status::StockStatus;

/// The derived consensus for one (item, location) pair.
///
/// At most one row exists per pair. Created on the first observation for the
/// pair, overwritten by each recompute, and never deleted individually, only
/// by cascading removal of the item or location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusAggregate {
    pub item_id: String,
    pub location_id: String,
    pub status: StockStatus,
    pub confidence: Confidence,
    /// `created_at` of the most recent observation that fed the consensus.
    pub last_verified_at: DateTime<Utc>,
}
