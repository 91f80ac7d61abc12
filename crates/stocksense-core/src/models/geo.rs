use serde::{Deserialize, Serialize};

use crate::constants::KM_PER_MILE;

/// A point on the sphere, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A search radius in either unit. Converted to kilometers exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Radius {
    Km(f64),
    Miles(f64),
}

impl Radius {
    /// The internal unit is kilometers.
    pub fn as_km(self) -> f64 {
        match self {
            Radius::Km(km) => km,
            Radius::Miles(mi) => mi * KM_PER_MILE,
        }
    }
}

/// Rectangular latitude/longitude bounds used as a cheap prefilter.
///
/// `min_lng > max_lng` means the box crosses the antimeridian and the
/// longitude range wraps; [`contains`](Self::contains) and the storage
/// prefilter both honor that, so a box computed around a near-seam center
/// still has no false negatives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Whether the longitude range wraps across the antimeridian.
    pub fn wraps_antimeridian(&self) -> bool {
        self.min_lng > self.max_lng
    }

    /// Whether a point lies inside the bounds.
    pub fn contains(&self, point: GeoPoint) -> bool {
        if point.lat < self.min_lat || point.lat > self.max_lat {
            return false;
        }
        if self.wraps_antimeridian() {
            point.lng >= self.min_lng || point.lng <= self.max_lng
        } else {
            point.lng >= self.min_lng && point.lng <= self.max_lng
        }
    }
}
