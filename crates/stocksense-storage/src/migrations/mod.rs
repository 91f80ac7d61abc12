//! Versioned schema migrations keyed off `PRAGMA user_version`.
//!
//! Each module migrates one version step and must stay idempotent
//! (`IF NOT EXISTS` guards), so a crash between a step and the version bump
//! is repaired on the next startup.

pub mod v001_core_tables;
pub mod v002_aggregate_tables;

use rusqlite::Connection;

use stocksense_core::errors::{StockError, StockResult, StorageError};

use crate::to_storage_err;

/// Schema version the code expects.
pub const LATEST_VERSION: u32 = 2;

/// Bring the database schema up to [`LATEST_VERSION`], applying each missing
/// migration in order and bumping `user_version` after each step.
pub fn run_migrations(conn: &Connection) -> StockResult<()> {
    let current = user_version(conn)?;
    if current >= LATEST_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=LATEST_VERSION {
        apply(conn, version).map_err(|e| {
            StockError::StorageError(StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })
        })?;
        set_user_version(conn, version)?;
        tracing::info!(version, "applied schema migration");
    }
    Ok(())
}

fn apply(conn: &Connection, version: u32) -> StockResult<()> {
    match version {
        1 => v001_core_tables::migrate(conn),
        2 => v002_aggregate_tables::migrate(conn),
        other => Err(to_storage_err(format!("unknown schema version {other}"))),
    }
}

fn user_version(conn: &Connection) -> StockResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

fn set_user_version(conn: &Connection, version: u32) -> StockResult<()> {
    conn.pragma_update(None, "user_version", version)
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
