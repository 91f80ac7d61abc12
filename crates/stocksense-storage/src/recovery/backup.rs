//! Online backup via SQLite's backup API.

use std::path::Path;
use std::time::Duration;

use rusqlite::backup::Backup;
use rusqlite::Connection;

use stocksense_core::errors::StockResult;

use crate::to_storage_err;

/// Copy the live database into `dest`, page batches interleaved with short
/// pauses so concurrent readers stay responsive. `dest` is overwritten.
pub fn create_backup(conn: &Connection, dest: &Path) -> StockResult<()> {
    let mut dst = Connection::open(dest).map_err(|e| to_storage_err(e.to_string()))?;
    let backup = Backup::new(conn, &mut dst).map_err(|e| to_storage_err(e.to_string()))?;
    backup
        .run_to_completion(64, Duration::from_millis(50), None)
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
