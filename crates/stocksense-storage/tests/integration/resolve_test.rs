//! Integration test: identifier resolution precedence and suggestions.

use stocksense_core::models::Item;
use stocksense_core::traits::IStockStore;
use stocksense_storage::StorageEngine;

#[test]
fn test_resolution_prefers_code_then_name_then_synonym() {
    let engine = StorageEngine::open_in_memory().unwrap();

    // An item whose *code* collides with another item's *name*.
    let coded = Item::new("Lisinopril").with_code("metformin");
    let named = Item::new("Metformin").with_synonyms(vec!["Glucophage".to_string()]);
    engine.insert_item(&coded).unwrap();
    engine.insert_item(&named).unwrap();

    // Exact code wins over the case-insensitive name match.
    let hit = engine.resolve_item("metformin").unwrap().unwrap();
    assert_eq!(hit.id, coded.id);

    // No code matches "METFORMIN", so the name match wins.
    let hit = engine.resolve_item("METFORMIN").unwrap().unwrap();
    assert_eq!(hit.id, named.id);

    // Synonym resolution is also case-insensitive.
    let hit = engine.resolve_item("glucophage").unwrap().unwrap();
    assert_eq!(hit.id, named.id);

    assert!(engine.resolve_item("ibuprofen").unwrap().is_none());
}

#[test]
fn test_resolved_item_carries_its_synonyms() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = Item::new("Albuterol")
        .with_synonyms(vec!["Salbutamol".to_string(), "Ventolin".to_string()]);
    engine.insert_item(&item).unwrap();

    let hit = engine.resolve_item("ventolin").unwrap().unwrap();
    assert_eq!(hit.synonyms, vec!["Salbutamol", "Ventolin"]);
}

#[test]
fn test_suggest_matches_name_substring_and_synonym() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.insert_item(&Item::new("Amoxicillin")).unwrap();
    engine.insert_item(&Item::new("Amoxapine")).unwrap();
    engine
        .insert_item(&Item::new("Tylenol").with_synonyms(vec!["Acetamoxi".to_string()]))
        .unwrap();
    engine.insert_item(&Item::new("Ibuprofen")).unwrap();

    let hits = engine.suggest_items("amox", 10).unwrap();
    let names: Vec<&str> = hits.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Amoxapine", "Amoxicillin", "Tylenol"]);
}

#[test]
fn test_suggest_matches_exact_code_only() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .insert_item(&Item::new("Insulin Lispro").with_code("0002-8215-01"))
        .unwrap();

    assert_eq!(engine.suggest_items("0002-8215-01", 10).unwrap().len(), 1);
    // A code prefix is not a match; codes resolve exactly.
    assert!(engine.suggest_items("0002-8215", 10).unwrap().is_empty());
}

#[test]
fn test_suggest_caps_at_limit() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for i in 0..15 {
        engine.insert_item(&Item::new(format!("Statin-{i:02}"))).unwrap();
    }

    let hits = engine.suggest_items("statin", 10).unwrap();
    assert_eq!(hits.len(), 10);
    // Name-ordered, so the first ten win.
    assert_eq!(hits[0].name, "Statin-00");
    assert_eq!(hits[9].name, "Statin-09");
}
