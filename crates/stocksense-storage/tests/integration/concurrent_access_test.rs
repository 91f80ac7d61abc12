//! Integration test: read pool + write connection under load.

use std::sync::Arc;

use stocksense_core::models::{Item, Location, Observation, ObservationSource, StockStatus};
use stocksense_core::traits::IStockStore;
use stocksense_storage::StorageEngine;

#[test]
fn test_concurrent_reads_during_writes() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("concurrent.db");
    let engine = Arc::new(StorageEngine::open(&db_path).unwrap());

    let item = Item::new("Amoxicillin");
    let location = Location::new("Corner Pharmacy", "12 Main St", 40.7, -74.0);
    engine.insert_item(&item).unwrap();
    engine.insert_location(&location).unwrap();

    // Reader threads hammer lookups while the writer appends observations.
    let mut handles = vec![];
    for _ in 0..4 {
        let engine = Arc::clone(&engine);
        let item_id = item.id.clone();
        let location_id = location.id.clone();
        handles.push(std::thread::spawn(move || {
            for _ in 0..25 {
                engine.find_item(&item_id).unwrap();
                engine
                    .recent_observations(&item_id, &location_id, 50)
                    .unwrap();
            }
        }));
    }

    let writer_engine = Arc::clone(&engine);
    let writer_item = item.id.clone();
    let writer_location = location.id.clone();
    let writer = std::thread::spawn(move || {
        for _ in 0..50 {
            let obs = Observation::new(
                &writer_item,
                &writer_location,
                StockStatus::InStock,
                ObservationSource::Public,
            );
            writer_engine.insert_observation(&obs).unwrap();
        }
    });

    writer.join().expect("writer should not panic");
    for handle in handles {
        handle.join().expect("reader should not panic");
    }

    assert_eq!(engine.count_observations().unwrap(), 50);
}
