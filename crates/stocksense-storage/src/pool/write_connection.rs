//! The single write connection. Every mutation in the system goes through
//! this mutex, which is what makes multi-step writes appear atomic to the
//! rest of the workspace.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use stocksense_core::errors::StockResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Exclusive handle to the one connection allowed to write.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> StockResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> StockResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure while holding the writer. Multi-statement work done
    /// inside the closure is serialized against every other write.
    pub fn with_conn<F, T>(&self, f: F) -> StockResult<T>
    where
        F: FnOnce(&Connection) -> StockResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
