//! Great-circle distance and the rectangular radius prefilter.
//!
//! Distances use the haversine formula on a spherical Earth. The bounding
//! box is a deliberate over-approximation of the radius circle: it may admit
//! points beyond the radius, but it must never exclude a point within it.
//! Callers re-check every candidate with [`haversine_km`].

use stocksense_core::constants::{EARTH_RADIUS_KM, KM_PER_DEGREE_LAT};
use stocksense_core::models::{GeoBounds, GeoPoint};

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h past 1 for near-antipodal pairs; asin needs [-1, 1].
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Conservative bounding box for a radius circle around `center`.
///
/// The latitude span converts the radius at the fixed meridian scale. The
/// longitude span is sized at the box edge nearest a pole, where a degree of
/// longitude covers the least ground, so the box always contains the full
/// circle. A box that reaches a pole covers every longitude; one that
/// crosses the antimeridian comes back with `min_lng > max_lng` (see
/// [`GeoBounds::wraps_antimeridian`]).
pub fn bounding_box(center: GeoPoint, radius_km: f64) -> GeoBounds {
    let lat_delta = radius_km / KM_PER_DEGREE_LAT;
    let min_lat = (center.lat - lat_delta).max(-90.0);
    let max_lat = (center.lat + lat_delta).min(90.0);

    let edge_lat = min_lat.abs().max(max_lat.abs());
    let km_per_degree_lng = KM_PER_DEGREE_LAT * edge_lat.to_radians().cos();
    let lng_delta = if km_per_degree_lng > f64::EPSILON {
        radius_km / km_per_degree_lng
    } else {
        180.0
    };

    if min_lat <= -90.0 || max_lat >= 90.0 || lng_delta >= 180.0 {
        // The circle surrounds a pole or spans half the globe; every
        // longitude is inside.
        return GeoBounds {
            min_lat,
            max_lat,
            min_lng: -180.0,
            max_lng: 180.0,
        };
    }

    let mut min_lng = center.lng - lng_delta;
    let mut max_lng = center.lng + lng_delta;
    if min_lng < -180.0 {
        min_lng += 360.0;
    }
    if max_lng > 180.0 {
        max_lng -= 360.0;
    }

    GeoBounds {
        min_lat,
        max_lat,
        min_lng,
        max_lng,
    }
}
