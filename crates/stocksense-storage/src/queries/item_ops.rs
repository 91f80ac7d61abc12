//! Insert, lookup, resolution, suggestion, and delete for items.

use rusqlite::{params, Connection, OptionalExtension};

use stocksense_core::errors::{StockError, StockResult};
use stocksense_core::models::Item;

use crate::to_storage_err;

/// Insert an item with its synonyms. Wrapped in a transaction so the row and
/// its synonyms land all-or-nothing.
pub fn insert_item(conn: &Connection, item: &Item) -> StockResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_item begin: {e}")))?;

    match insert_item_inner(&tx, item) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("insert_item commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn insert_item_inner(conn: &Connection, item: &Item) -> StockResult<()> {
    conn.execute(
        "INSERT INTO items (id, name, code) VALUES (?1, ?2, ?3)",
        params![item.id, item.name, item.code],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    for synonym in &item.synonyms {
        conn.execute(
            "INSERT OR IGNORE INTO item_synonyms (item_id, synonym) VALUES (?1, ?2)",
            params![item.id, synonym],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

/// Get a single item by id, including its synonyms.
pub fn get_item(conn: &Connection, id: &str) -> StockResult<Option<Item>> {
    let item = conn
        .query_row(
            "SELECT id, name, code FROM items WHERE id = ?1",
            params![id],
            row_to_item,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match item {
        Some(mut item) => {
            load_synonyms(conn, &mut item)?;
            Ok(Some(item))
        }
        None => Ok(None),
    }
}

/// Resolve an identifier to an item: exact code first, then case-insensitive
/// exact name, then case-insensitive synonym.
pub fn resolve_item(conn: &Connection, identifier: &str) -> StockResult<Option<Item>> {
    let by_code = conn
        .query_row(
            "SELECT id, name, code FROM items WHERE code = ?1",
            params![identifier],
            row_to_item,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    if let Some(item) = by_code {
        return finish(conn, item);
    }

    let by_name = conn
        .query_row(
            "SELECT id, name, code FROM items WHERE lower(name) = lower(?1)",
            params![identifier],
            row_to_item,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    if let Some(item) = by_name {
        return finish(conn, item);
    }

    let by_synonym = conn
        .query_row(
            "SELECT i.id, i.name, i.code FROM items i
             JOIN item_synonyms s ON s.item_id = i.id
             WHERE lower(s.synonym) = lower(?1)
             LIMIT 1",
            params![identifier],
            row_to_item,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    match by_synonym {
        Some(item) => finish(conn, item),
        None => Ok(None),
    }
}

fn finish(conn: &Connection, mut item: Item) -> StockResult<Option<Item>> {
    load_synonyms(conn, &mut item)?;
    Ok(Some(item))
}

/// Case-insensitive substring match on name or synonym, or exact code match.
/// Ordered by name, capped at `limit`. `instr` sidesteps LIKE wildcard
/// escaping for user-typed fragments.
pub fn suggest_items(conn: &Connection, query: &str, limit: usize) -> StockResult<Vec<Item>> {
    let mut stmt = conn
        .prepare(
            "SELECT DISTINCT i.id, i.name, i.code FROM items i
             LEFT JOIN item_synonyms s ON s.item_id = i.id
             WHERE instr(lower(i.name), lower(?1)) > 0
                OR instr(lower(s.synonym), lower(?1)) > 0
                OR i.code = ?1
             ORDER BY i.name COLLATE NOCASE
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![query, limit as i64], row_to_item)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut items = Vec::new();
    for row in rows {
        let mut item = row.map_err(|e| to_storage_err(e.to_string()))?;
        load_synonyms(conn, &mut item)?;
        items.push(item);
    }
    Ok(items)
}

/// Delete an item. Synonyms, observations, and aggregates cascade via
/// foreign keys.
pub fn delete_item(conn: &Connection, id: &str) -> StockResult<()> {
    let rows = conn
        .execute("DELETE FROM items WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(StockError::ItemNotFound { id: id.to_string() });
    }
    Ok(())
}

pub(crate) fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        synonyms: Vec::new(),
    })
}

pub(crate) fn load_synonyms(conn: &Connection, item: &mut Item) -> StockResult<()> {
    let mut stmt = conn
        .prepare("SELECT synonym FROM item_synonyms WHERE item_id = ?1 ORDER BY synonym")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![item.id], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    item.synonyms.clear();
    for row in rows {
        item.synonyms
            .push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(())
}
