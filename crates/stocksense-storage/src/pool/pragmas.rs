//! PRAGMA configuration applied to every SQLite connection.
//!
//! Writer: WAL mode, NORMAL sync, 64MB mmap, 16MB cache, 5s busy_timeout,
//! foreign_keys ON. Readers: query_only plus the same cache and timeout
//! settings, without the journal-mode write.

use rusqlite::Connection;

use stocksense_core::errors::StockResult;

use crate::to_storage_err;

/// Apply all performance and safety pragmas to the write connection.
pub fn apply_pragmas(conn: &Connection) -> StockResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = 67108864;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Apply pragmas safe for a read-only connection. Skips journal_mode, which
/// would require a write on a database not yet in WAL.
pub fn apply_read_pragmas(conn: &Connection) -> StockResult<()> {
    conn.execute_batch(
        "
        PRAGMA mmap_size = 67108864;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> StockResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
