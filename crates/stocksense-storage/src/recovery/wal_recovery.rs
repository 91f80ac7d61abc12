//! Attempt WAL checkpoint recovery after a suspected bad shutdown.

use rusqlite::Connection;

use stocksense_core::errors::StockResult;

/// Force a truncating WAL checkpoint. Failure is reported, not raised, so a
/// startup path can fall back to a backup instead of aborting.
pub fn attempt_wal_recovery(conn: &Connection) -> StockResult<bool> {
    match conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)") {
        Ok(()) => Ok(true),
        Err(e) => {
            tracing::warn!("WAL checkpoint recovery failed: {e}");
            Ok(false)
        }
    }
}
