//! # stocksense-core
//!
//! Foundation crate for the stocksense availability system.
//! Defines all models, errors, config, constants, and the storage trait.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::StockConfig;
pub use errors::{StockError, StockResult};
pub use models::{
    Confidence, GeoBounds, GeoPoint, Item, Location, Observation, ObservationSource, Radius,
    StatusAggregate, StockStatus,
};
pub use traits::IStockStore;
