//! Count and breakdown queries backing admin views.

use std::str::FromStr;

use rusqlite::{params, Connection};

use stocksense_core::errors::StockResult;
use stocksense_core::models::StockStatus;

use crate::to_storage_err;

pub fn count_items(conn: &Connection) -> StockResult<u64> {
    count(conn, "SELECT COUNT(*) FROM items")
}

pub fn count_locations(conn: &Connection) -> StockResult<u64> {
    count(conn, "SELECT COUNT(*) FROM locations")
}

pub fn count_observations(conn: &Connection) -> StockResult<u64> {
    count(conn, "SELECT COUNT(*) FROM observations")
}

fn count(conn: &Connection, sql: &str) -> StockResult<u64> {
    let n: i64 = conn
        .query_row(sql, [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as u64)
}

/// Aggregate counts per status for an item, zero-filled and ordered the way
/// the status enum enumerates.
pub fn item_status_breakdown(
    conn: &Connection,
    item_id: &str,
) -> StockResult<Vec<(StockStatus, u64)>> {
    let mut stmt = conn
        .prepare("SELECT status, COUNT(*) FROM aggregates WHERE item_id = ?1 GROUP BY status")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![item_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut counts = std::collections::HashMap::new();
    for row in rows {
        let (status_str, n) = row.map_err(|e| to_storage_err(e.to_string()))?;
        counts.insert(StockStatus::from_str(&status_str)?, n as u64);
    }

    Ok(StockStatus::ALL
        .iter()
        .map(|status| (*status, counts.get(status).copied().unwrap_or(0)))
        .collect())
}
