use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;

/// A physical place where items are stocked (e.g. a pharmacy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// UUID v4 identifier (or an externally supplied id).
    pub id: String,
    pub name: String,
    pub address: String,
    /// Latitude in degrees, [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, [-180, 180].
    pub lng: f64,
}

impl Location {
    /// Create a new location with a generated id.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            address: address.into(),
            lat,
            lng,
        }
    }

    /// The location's geographic point.
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}
