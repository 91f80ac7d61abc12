//! Autocomplete suggestions over item names, codes, and synonyms.

use stocksense_core::errors::StockResult;
use stocksense_core::traits::IStockStore;

/// One autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
}

/// Suggest items whose name or synonyms contain `query`, or whose code
/// matches it exactly. Matching is case-insensitive and results come back
/// name-ordered, capped at `limit`. A blank query suggests nothing.
pub fn suggest_items(
    store: &dyn IStockStore,
    query: &str,
    limit: usize,
) -> StockResult<Vec<Suggestion>> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let items = store.suggest_items(trimmed, limit)?;
    Ok(items
        .into_iter()
        .map(|item| Suggestion {
            id: item.id,
            name: item.name,
            code: item.code,
        })
        .collect())
}
