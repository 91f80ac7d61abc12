//! v001: items, item_synonyms, locations, observations.

use rusqlite::Connection;

use stocksense_core::errors::StockResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> StockResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS items (
            id   TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            code TEXT
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_items_name ON items(lower(name));
        CREATE UNIQUE INDEX IF NOT EXISTS idx_items_code ON items(code) WHERE code IS NOT NULL;

        CREATE TABLE IF NOT EXISTS item_synonyms (
            item_id TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
            synonym TEXT NOT NULL,
            PRIMARY KEY (item_id, synonym)
        );

        CREATE INDEX IF NOT EXISTS idx_synonyms_lower ON item_synonyms(lower(synonym));

        CREATE TABLE IF NOT EXISTS locations (
            id      TEXT PRIMARY KEY,
            name    TEXT NOT NULL,
            address TEXT NOT NULL,
            lat     REAL NOT NULL,
            lng     REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_locations_lat_lng ON locations(lat, lng);

        CREATE TABLE IF NOT EXISTS observations (
            id          TEXT PRIMARY KEY,
            item_id     TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
            location_id TEXT NOT NULL REFERENCES locations(id) ON DELETE CASCADE,
            status      TEXT NOT NULL,
            source      TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            note        TEXT,
            reporter    TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_observations_pair_time
            ON observations(item_id, location_id, created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_observations_location
            ON observations(location_id);
        CREATE INDEX IF NOT EXISTS idx_observations_reporter
            ON observations(reporter) WHERE reporter IS NOT NULL;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
