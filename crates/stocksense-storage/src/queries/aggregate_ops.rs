//! Upsert and read operations for consensus aggregates.

use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};

use stocksense_core::errors::StockResult;
use stocksense_core::models::{
    Confidence, GeoBounds, Item, Location, StatusAggregate, StockStatus,
};

use super::item_ops::load_synonyms;
use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

/// Create or overwrite the single aggregate row for the pair.
pub fn upsert_aggregate(conn: &Connection, aggregate: &StatusAggregate) -> StockResult<()> {
    conn.execute(
        "INSERT INTO aggregates (item_id, location_id, status, confidence, last_verified_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(item_id, location_id) DO UPDATE SET
             status = excluded.status,
             confidence = excluded.confidence,
             last_verified_at = excluded.last_verified_at",
        params![
            aggregate.item_id,
            aggregate.location_id,
            aggregate.status.as_str(),
            aggregate.confidence.value(),
            fmt_ts(aggregate.last_verified_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_aggregate(
    conn: &Connection,
    item_id: &str,
    location_id: &str,
) -> StockResult<Option<StatusAggregate>> {
    let row = conn
        .query_row(
            "SELECT item_id, location_id, status, confidence, last_verified_at
             FROM aggregates
             WHERE item_id = ?1 AND location_id = ?2",
            params![item_id, location_id],
            |row| Ok(row_to_aggregate(row)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.transpose()
}

/// Aggregates for an item whose location falls inside the bounds, joined
/// with their locations. `exclude_out` drops OUT rows in SQL so they never
/// reach the ranking pass.
pub fn aggregates_for_item_in_bounds(
    conn: &Connection,
    item_id: &str,
    bounds: &GeoBounds,
    exclude_out: bool,
) -> StockResult<Vec<(StatusAggregate, Location)>> {
    let lng_clause = if bounds.wraps_antimeridian() {
        "(l.lng >= ?4 OR l.lng <= ?5)"
    } else {
        "l.lng BETWEEN ?4 AND ?5"
    };
    let status_clause = if exclude_out {
        " AND a.status != 'OUT'"
    } else {
        ""
    };
    let sql = format!(
        "SELECT a.item_id, a.location_id, a.status, a.confidence, a.last_verified_at,
                l.id, l.name, l.address, l.lat, l.lng
         FROM aggregates a
         JOIN locations l ON l.id = a.location_id
         WHERE a.item_id = ?1
           AND l.lat BETWEEN ?2 AND ?3
           AND {lng_clause}{status_clause}"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            params![
                item_id,
                bounds.min_lat,
                bounds.max_lat,
                bounds.min_lng,
                bounds.max_lng
            ],
            |row| {
                let aggregate = row_to_aggregate(row);
                let location = row_to_location_at(row, 5);
                Ok((aggregate, location))
            },
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (aggregate, location) = row.map_err(|e| to_storage_err(e.to_string()))?;
        results.push((aggregate?, location.map_err(|e| to_storage_err(e.to_string()))?));
    }
    Ok(results)
}

/// All aggregates at a location, joined with their items.
pub fn aggregates_for_location(
    conn: &Connection,
    location_id: &str,
) -> StockResult<Vec<(StatusAggregate, Item)>> {
    let mut stmt = conn
        .prepare(
            "SELECT a.item_id, a.location_id, a.status, a.confidence, a.last_verified_at,
                    i.id, i.name, i.code
             FROM aggregates a
             JOIN items i ON i.id = a.item_id
             WHERE a.location_id = ?1
             ORDER BY i.name COLLATE NOCASE",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![location_id], |row| {
            let aggregate = row_to_aggregate(row);
            let item = Item {
                id: row.get(5)?,
                name: row.get(6)?,
                code: row.get(7)?,
                synonyms: Vec::new(),
            };
            Ok((aggregate, item))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (aggregate, mut item) = row.map_err(|e| to_storage_err(e.to_string()))?;
        load_synonyms(conn, &mut item)?;
        results.push((aggregate?, item));
    }
    Ok(results)
}

fn row_to_aggregate(row: &rusqlite::Row<'_>) -> StockResult<StatusAggregate> {
    let status_str: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let last_verified_str: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(StatusAggregate {
        item_id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        location_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        status: StockStatus::from_str(&status_str)?,
        confidence: Confidence::new(row.get(3).map_err(|e| to_storage_err(e.to_string()))?),
        last_verified_at: parse_ts(&last_verified_str)?,
    })
}

fn row_to_location_at(row: &rusqlite::Row<'_>, base: usize) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get(base)?,
        name: row.get(base + 1)?,
        address: row.get(base + 2)?,
        lat: row.get(base + 3)?,
        lng: row.get(base + 4)?,
    })
}
