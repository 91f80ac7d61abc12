//! Append and read operations for observations. No update and no single-row
//! delete exist: observations leave the database only when their item or
//! location cascades away.

use std::str::FromStr;

use rusqlite::{params, Connection};

use stocksense_core::errors::StockResult;
use stocksense_core::models::{Observation, ObservationSource, StockStatus};

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

pub fn insert_observation(conn: &Connection, observation: &Observation) -> StockResult<()> {
    conn.execute(
        "INSERT INTO observations (
            id, item_id, location_id, status, source, created_at, note, reporter
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            observation.id,
            observation.item_id,
            observation.location_id,
            observation.status.as_str(),
            observation.source.as_str(),
            fmt_ts(observation.created_at),
            observation.note,
            observation.reporter,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Up to `limit` most recent observations for the pair, newest first. Ties
/// on created_at break on id so the order stays stable across reads.
pub fn recent_observations(
    conn: &Connection,
    item_id: &str,
    location_id: &str,
    limit: usize,
) -> StockResult<Vec<Observation>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, item_id, location_id, status, source, created_at, note, reporter
             FROM observations
             WHERE item_id = ?1 AND location_id = ?2
             ORDER BY created_at DESC, id DESC
             LIMIT ?3",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![item_id, location_id, limit as i64], |row| {
            Ok(row_to_observation(row))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut observations = Vec::new();
    for row in rows {
        observations.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(observations)
}

/// Null out the reporter reference on every observation from `reporter`.
/// Returns the number of rows touched.
pub fn detach_reporter(conn: &Connection, reporter: &str) -> StockResult<usize> {
    let rows = conn
        .execute(
            "UPDATE observations SET reporter = NULL WHERE reporter = ?1",
            params![reporter],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows)
}

fn row_to_observation(row: &rusqlite::Row<'_>) -> StockResult<Observation> {
    let status_str: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let source_str: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let created_at_str: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(Observation {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        item_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        location_id: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        status: StockStatus::from_str(&status_str)?,
        source: ObservationSource::from_str(&source_str)?,
        created_at: parse_ts(&created_at_str)?,
        note: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        reporter: row.get(7).map_err(|e| to_storage_err(e.to_string()))?,
    })
}
