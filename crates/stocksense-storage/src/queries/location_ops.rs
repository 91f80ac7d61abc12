//! Insert, lookup, bounded queries, and delete for locations.

use rusqlite::{params, Connection, OptionalExtension};

use stocksense_core::errors::{StockError, StockResult};
use stocksense_core::models::{GeoBounds, Location};

use crate::to_storage_err;

pub fn insert_location(conn: &Connection, location: &Location) -> StockResult<()> {
    conn.execute(
        "INSERT INTO locations (id, name, address, lat, lng) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            location.id,
            location.name,
            location.address,
            location.lat,
            location.lng
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_location(conn: &Connection, id: &str) -> StockResult<Option<Location>> {
    conn.query_row(
        "SELECT id, name, address, lat, lng FROM locations WHERE id = ?1",
        params![id],
        row_to_location,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Locations inside the bounds, optionally narrowed to names containing any
/// of `name_terms` (case-insensitive OR). The box does the heavy reduction
/// in SQL; the term filter runs over the survivors here.
pub fn locations_in_bounds(
    conn: &Connection,
    bounds: &GeoBounds,
    name_terms: &[String],
) -> StockResult<Vec<Location>> {
    let sql = format!(
        "SELECT id, name, address, lat, lng FROM locations
         WHERE lat BETWEEN ?1 AND ?2 AND {}",
        lng_clause(bounds)
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            params![bounds.min_lat, bounds.max_lat, bounds.min_lng, bounds.max_lng],
            row_to_location,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let terms: Vec<String> = name_terms.iter().map(|t| t.to_lowercase()).collect();
    let mut locations = Vec::new();
    for row in rows {
        let location = row.map_err(|e| to_storage_err(e.to_string()))?;
        if terms.is_empty() {
            locations.push(location);
            continue;
        }
        let name = location.name.to_lowercase();
        if terms.iter().any(|t| name.contains(t)) {
            locations.push(location);
        }
    }
    Ok(locations)
}

/// Delete a location. Observations and aggregates cascade via foreign keys.
pub fn delete_location(conn: &Connection, id: &str) -> StockResult<()> {
    let rows = conn
        .execute("DELETE FROM locations WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(StockError::LocationNotFound { id: id.to_string() });
    }
    Ok(())
}

/// Longitude clause for a bounds filter. A wrapped box (crossing the
/// antimeridian) matches either side of the seam instead of a range.
fn lng_clause(bounds: &GeoBounds) -> &'static str {
    if bounds.wraps_antimeridian() {
        "(lng >= ?3 OR lng <= ?4)"
    } else {
        "lng BETWEEN ?3 AND ?4"
    }
}

pub(crate) fn row_to_location(row: &rusqlite::Row<'_>) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        lat: row.get(3)?,
        lng: row.get(4)?,
    })
}
