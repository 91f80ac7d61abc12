//! PRAGMA integrity_check, detect corruption early.

use rusqlite::Connection;

use stocksense_core::errors::StockResult;

use crate::to_storage_err;

/// Run an integrity check. Returns true when the database reports healthy.
pub fn check_integrity(conn: &Connection) -> StockResult<bool> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(result == "ok")
}
