//! # stocksense-search
//!
//! Proximity search over the derived availability aggregates. Queries are
//! answered in stages: resolve the subject, prefilter candidates with a
//! conservative bounding box, re-check each survivor with the exact
//! great-circle distance, then rank and truncate. The box may over-admit
//! but never excludes a point within the radius, so the exact re-check is
//! the only authority on distance.

pub mod engine;
pub mod geo;
pub mod suggest;

pub use engine::{
    BucketEntry, ItemHit, ItemSearch, LocationHit, ProximityQuery, SearchEngine, StatusBuckets,
};
pub use suggest::{suggest_items, Suggestion};
