//! v002: aggregates (one consensus row per item/location pair).

use rusqlite::Connection;

use stocksense_core::errors::StockResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> StockResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS aggregates (
            item_id          TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
            location_id      TEXT NOT NULL REFERENCES locations(id) ON DELETE CASCADE,
            status           TEXT NOT NULL,
            confidence       REAL NOT NULL,
            last_verified_at TEXT NOT NULL,
            PRIMARY KEY (item_id, location_id)
        );

        CREATE INDEX IF NOT EXISTS idx_aggregates_location ON aggregates(location_id);
        CREATE INDEX IF NOT EXISTS idx_aggregates_item_status ON aggregates(item_id, status);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
