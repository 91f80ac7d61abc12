//! Integration test: bounding-box queries, including boxes that wrap the
//! antimeridian.

use chrono::Utc;
use stocksense_core::models::{
    Confidence, GeoBounds, Item, Location, StatusAggregate, StockStatus,
};
use stocksense_core::traits::IStockStore;
use stocksense_storage::StorageEngine;

fn location_at(name: &str, lat: f64, lng: f64) -> Location {
    Location::new(name, "1 Test Rd", lat, lng)
}

fn aggregate_for(item: &Item, location: &Location, status: StockStatus) -> StatusAggregate {
    StatusAggregate {
        item_id: item.id.clone(),
        location_id: location.id.clone(),
        status,
        confidence: Confidence::new(0.5),
        last_verified_at: Utc::now(),
    }
}

#[test]
fn test_locations_in_bounds_filters_by_box() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let inside = location_at("Inside", 40.0, -74.0);
    let north = location_at("Too North", 41.5, -74.0);
    let east = location_at("Too East", 40.0, -72.0);
    for location in [&inside, &north, &east] {
        engine.insert_location(location).unwrap();
    }

    let bounds = GeoBounds {
        min_lat: 39.5,
        max_lat: 40.5,
        min_lng: -74.5,
        max_lng: -73.5,
    };
    let found = engine.locations_in_bounds(&bounds, &[]).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Inside");
}

#[test]
fn test_locations_in_bounds_honors_name_terms_as_or() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for name in ["City Drugs", "Corner Pharmacy", "Hardware Store"] {
        engine.insert_location(&location_at(name, 40.0, -74.0)).unwrap();
    }

    let bounds = GeoBounds {
        min_lat: 39.0,
        max_lat: 41.0,
        min_lng: -75.0,
        max_lng: -73.0,
    };
    let terms = vec!["pharmacy".to_string(), "drugs".to_string()];
    let mut names: Vec<String> = engine
        .locations_in_bounds(&bounds, &terms)
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["City Drugs", "Corner Pharmacy"]);
}

#[test]
fn test_wrapped_bounds_match_both_sides_of_the_seam() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let west = location_at("West of Seam", 0.0, 179.0);
    let east = location_at("East of Seam", 0.0, -179.0);
    let away = location_at("Far Away", 0.0, 0.0);
    for location in [&west, &east, &away] {
        engine.insert_location(location).unwrap();
    }

    let bounds = GeoBounds {
        min_lat: -1.0,
        max_lat: 1.0,
        min_lng: 178.0,
        max_lng: -178.0,
    };
    let mut names: Vec<String> = engine
        .locations_in_bounds(&bounds, &[])
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["East of Seam", "West of Seam"]);
}

#[test]
fn test_aggregates_in_bounds_can_exclude_out() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let item = Item::new("Amoxicillin");
    engine.insert_item(&item).unwrap();

    let stocked = location_at("Stocked", 40.0, -74.0);
    let empty = location_at("Empty", 40.1, -74.1);
    engine.insert_location(&stocked).unwrap();
    engine.insert_location(&empty).unwrap();
    engine
        .upsert_aggregate(&aggregate_for(&item, &stocked, StockStatus::InStock))
        .unwrap();
    engine
        .upsert_aggregate(&aggregate_for(&item, &empty, StockStatus::Out))
        .unwrap();

    let bounds = GeoBounds {
        min_lat: 39.0,
        max_lat: 41.0,
        min_lng: -75.0,
        max_lng: -73.0,
    };

    let all = engine
        .aggregates_for_item_in_bounds(&item.id, &bounds, false)
        .unwrap();
    assert_eq!(all.len(), 2);

    let in_stock_only = engine
        .aggregates_for_item_in_bounds(&item.id, &bounds, true)
        .unwrap();
    assert_eq!(in_stock_only.len(), 1);
    assert_eq!(in_stock_only[0].1.name, "Stocked");
    assert_eq!(in_stock_only[0].0.status, StockStatus::InStock);
}

#[test]
fn test_aggregates_for_location_lists_items_by_name() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let location = location_at("Corner Pharmacy", 40.0, -74.0);
    engine.insert_location(&location).unwrap();

    let zinc = Item::new("Zinc");
    let aspirin = Item::new("Aspirin");
    engine.insert_item(&zinc).unwrap();
    engine.insert_item(&aspirin).unwrap();
    engine
        .upsert_aggregate(&aggregate_for(&zinc, &location, StockStatus::Low))
        .unwrap();
    engine
        .upsert_aggregate(&aggregate_for(&aspirin, &location, StockStatus::InStock))
        .unwrap();

    let listed = engine.aggregates_for_location(&location.id).unwrap();
    let names: Vec<&str> = listed.iter().map(|(_, item)| item.name.as_str()).collect();
    assert_eq!(names, vec!["Aspirin", "Zinc"]);
}
