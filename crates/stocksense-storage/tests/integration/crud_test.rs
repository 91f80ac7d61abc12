//! Integration test: CRUD lifecycle for items, locations, observations,
//! and aggregates.

use chrono::{TimeZone, Utc};
use stocksense_core::models::{
    Confidence, Item, Location, Observation, ObservationSource, StatusAggregate, StockStatus,
};
use stocksense_core::traits::IStockStore;
use stocksense_core::StockError;
use stocksense_storage::StorageEngine;

fn make_item(name: &str) -> Item {
    Item::new(name)
        .with_code("0002-8215-01")
        .with_synonyms(vec!["Humalog".to_string()])
}

fn make_location(name: &str) -> Location {
    Location::new(name, "12 Main St", 40.7128, -74.0060)
}

#[test]
fn test_insert_and_get_item_with_synonyms() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = make_item("Insulin Lispro");

    engine.insert_item(&item).unwrap();
    let found = engine.find_item(&item.id).unwrap().expect("item should exist");

    assert_eq!(found.id, item.id);
    assert_eq!(found.name, "Insulin Lispro");
    assert_eq!(found.code.as_deref(), Some("0002-8215-01"));
    assert_eq!(found.synonyms, vec!["Humalog"]);
}

#[test]
fn test_find_missing_item_is_none() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.find_item("no-such-id").unwrap().is_none());
}

#[test]
fn test_insert_and_get_location() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let location = make_location("Corner Pharmacy");

    engine.insert_location(&location).unwrap();
    let found = engine
        .find_location(&location.id)
        .unwrap()
        .expect("location should exist");

    assert_eq!(found, location);
}

#[test]
fn test_observations_come_back_newest_first() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = make_item("Amoxicillin");
    let location = make_location("Corner Pharmacy");
    engine.insert_item(&item).unwrap();
    engine.insert_location(&location).unwrap();

    for hour in [9, 11, 10] {
        let obs = Observation::new(
            &item.id,
            &location.id,
            StockStatus::Low,
            ObservationSource::Public,
        )
        .with_created_at(Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap());
        engine.insert_observation(&obs).unwrap();
    }

    let recent = engine.recent_observations(&item.id, &location.id, 10).unwrap();
    assert_eq!(recent.len(), 3);
    let hours: Vec<u32> = recent
        .iter()
        .map(|o| chrono::Timelike::hour(&o.created_at))
        .collect();
    assert_eq!(hours, vec![11, 10, 9]);

    let capped = engine.recent_observations(&item.id, &location.id, 2).unwrap();
    assert_eq!(capped.len(), 2);
    assert_eq!(chrono::Timelike::hour(&capped[0].created_at), 11);
}

#[test]
fn test_observation_round_trips_note_and_reporter() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = make_item("Amoxicillin");
    let location = make_location("Corner Pharmacy");
    engine.insert_item(&item).unwrap();
    engine.insert_location(&location).unwrap();

    let obs = Observation::new(
        &item.id,
        &location.id,
        StockStatus::InStock,
        ObservationSource::Staff,
    )
    .with_created_at(Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap())
    .with_note("shelf restocked this morning")
    .with_reporter("user-42");
    engine.insert_observation(&obs).unwrap();

    let recent = engine.recent_observations(&item.id, &location.id, 1).unwrap();
    assert_eq!(recent[0], obs);
}

#[test]
fn test_detach_reporter_nulls_only_that_reporter() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = make_item("Amoxicillin");
    let location = make_location("Corner Pharmacy");
    engine.insert_item(&item).unwrap();
    engine.insert_location(&location).unwrap();

    for reporter in ["user-1", "user-1", "user-2"] {
        let obs =
            Observation::new(&item.id, &location.id, StockStatus::Out, ObservationSource::Public)
                .with_reporter(reporter);
        engine.insert_observation(&obs).unwrap();
    }

    let touched = engine.detach_reporter("user-1").unwrap();
    assert_eq!(touched, 2);

    let recent = engine.recent_observations(&item.id, &location.id, 10).unwrap();
    let reporters: Vec<Option<&str>> = recent.iter().map(|o| o.reporter.as_deref()).collect();
    assert_eq!(reporters.iter().filter(|r| r.is_none()).count(), 2);
    assert!(reporters.contains(&Some("user-2")));
}

#[test]
fn test_upsert_aggregate_overwrites_the_single_row() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = make_item("Amoxicillin");
    let location = make_location("Corner Pharmacy");
    engine.insert_item(&item).unwrap();
    engine.insert_location(&location).unwrap();

    let first = StatusAggregate {
        item_id: item.id.clone(),
        location_id: location.id.clone(),
        status: StockStatus::Low,
        confidence: Confidence::new(0.4),
        last_verified_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
    };
    engine.upsert_aggregate(&first).unwrap();

    let mut second = first.clone();
    second.status = StockStatus::InStock;
    second.confidence = Confidence::new(0.9);
    second.last_verified_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    engine.upsert_aggregate(&second).unwrap();

    let stored = engine
        .get_aggregate(&item.id, &location.id)
        .unwrap()
        .expect("aggregate should exist");
    assert_eq!(stored, second);
}

#[test]
fn test_delete_item_cascades_everything() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = make_item("Amoxicillin");
    let location = make_location("Corner Pharmacy");
    engine.insert_item(&item).unwrap();
    engine.insert_location(&location).unwrap();

    let obs = Observation::new(&item.id, &location.id, StockStatus::Out, ObservationSource::Public);
    engine.insert_observation(&obs).unwrap();
    engine
        .upsert_aggregate(&StatusAggregate {
            item_id: item.id.clone(),
            location_id: location.id.clone(),
            status: StockStatus::Out,
            confidence: Confidence::new(0.2),
            last_verified_at: obs.created_at,
        })
        .unwrap();

    engine.delete_item(&item.id).unwrap();

    assert!(engine.find_item(&item.id).unwrap().is_none());
    assert!(engine.recent_observations(&item.id, &location.id, 10).unwrap().is_empty());
    assert!(engine.get_aggregate(&item.id, &location.id).unwrap().is_none());
    assert_eq!(engine.count_observations().unwrap(), 0);
}

#[test]
fn test_delete_location_cascades_everything() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = make_item("Amoxicillin");
    let location = make_location("Corner Pharmacy");
    engine.insert_item(&item).unwrap();
    engine.insert_location(&location).unwrap();

    let obs = Observation::new(&item.id, &location.id, StockStatus::Low, ObservationSource::Staff);
    engine.insert_observation(&obs).unwrap();

    engine.delete_location(&location.id).unwrap();

    assert!(engine.find_location(&location.id).unwrap().is_none());
    assert_eq!(engine.count_observations().unwrap(), 0);
    // The item itself survives.
    assert!(engine.find_item(&item.id).unwrap().is_some());
}

#[test]
fn test_delete_missing_rows_report_not_found() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(matches!(
        engine.delete_item("ghost").unwrap_err(),
        StockError::ItemNotFound { .. }
    ));
    assert!(matches!(
        engine.delete_location("ghost").unwrap_err(),
        StockError::LocationNotFound { .. }
    ));
}

#[test]
fn test_counts_and_breakdown() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = make_item("Amoxicillin");
    engine.insert_item(&item).unwrap();

    let near = make_location("Near Pharmacy");
    let far = make_location("Far Pharmacy");
    engine.insert_location(&near).unwrap();
    engine.insert_location(&far).unwrap();

    for (location, status) in [(&near, StockStatus::InStock), (&far, StockStatus::Out)] {
        engine
            .upsert_aggregate(&StatusAggregate {
                item_id: item.id.clone(),
                location_id: location.id.clone(),
                status,
                confidence: Confidence::new(0.5),
                last_verified_at: Utc::now(),
            })
            .unwrap();
    }

    assert_eq!(engine.count_items().unwrap(), 1);
    assert_eq!(engine.count_locations().unwrap(), 2);

    let breakdown = engine.item_status_breakdown(&item.id).unwrap();
    assert_eq!(
        breakdown,
        vec![
            (StockStatus::InStock, 1),
            (StockStatus::Low, 0),
            (StockStatus::Out, 1),
            (StockStatus::Unknown, 0),
        ]
    );
}
