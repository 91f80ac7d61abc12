//! SQL query modules, one per entity family.

pub mod aggregate_ops;
pub mod item_ops;
pub mod location_ops;
pub mod observation_ops;
pub mod stats_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use stocksense_core::errors::StockResult;

use crate::to_storage_err;

/// Format a timestamp for storage. Fixed microsecond precision keeps the
/// lexicographic order of the TEXT column identical to chronological order,
/// which `ORDER BY created_at` depends on.
pub(crate) fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp back into UTC.
pub(crate) fn parse_ts(s: &str) -> StockResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
