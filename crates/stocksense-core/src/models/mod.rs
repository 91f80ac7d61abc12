pub mod aggregate;
pub mod confidence;
pub mod geo;
pub mod item;
pub mod location;
pub mod observation;
pub mod status;

pub use aggregate::StatusAggregate;
pub use confidence::Confidence;
pub use geo::{GeoBounds, GeoPoint, Radius};
pub use item::Item;
pub use location::Location;
pub use observation::Observation;
pub use status::{ObservationSource, StockStatus};
