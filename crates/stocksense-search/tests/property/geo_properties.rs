//! Property checks for the geo prefilter math.

use proptest::prelude::*;
use stocksense_core::constants::EARTH_RADIUS_KM;
use stocksense_core::models::GeoPoint;
use stocksense_search::geo::{bounding_box, haversine_km};

/// Destination point `distance_km` from `start` along `bearing_deg`.
fn destination(start: GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let arc = distance_km / EARTH_RADIUS_KM;
    let bearing = bearing_deg.to_radians();
    let lat1 = start.lat.to_radians();
    let lng1 = start.lng.to_radians();

    let lat2 = (lat1.sin() * arc.cos() + lat1.cos() * arc.sin() * bearing.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lng2 = lng1
        + (bearing.sin() * arc.sin() * lat1.cos()).atan2(arc.cos() - lat1.sin() * lat2.sin());

    let mut lng_deg = lng2.to_degrees();
    if lng_deg > 180.0 {
        lng_deg -= 360.0;
    }
    if lng_deg < -180.0 {
        lng_deg += 360.0;
    }
    GeoPoint::new(lat2.to_degrees(), lng_deg)
}

proptest! {
    #[test]
    fn distance_is_symmetric(
        lat_a in -85.0..85.0f64,
        lng_a in -180.0..180.0f64,
        lat_b in -85.0..85.0f64,
        lng_b in -180.0..180.0f64,
    ) {
        let a = GeoPoint::new(lat_a, lng_a);
        let b = GeoPoint::new(lat_b, lng_b);
        prop_assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn distance_is_nonnegative_and_bounded_by_half_the_circumference(
        lat_a in -90.0..=90.0f64,
        lng_a in -180.0..180.0f64,
        lat_b in -90.0..=90.0f64,
        lng_b in -180.0..180.0f64,
    ) {
        let d = haversine_km(GeoPoint::new(lat_a, lng_a), GeoPoint::new(lat_b, lng_b));
        prop_assert!(d >= 0.0);
        prop_assert!(d <= EARTH_RADIUS_KM * std::f64::consts::PI + 1e-6);
    }

    #[test]
    fn the_destination_helper_round_trips_its_distance(
        lat in -80.0..80.0f64,
        lng in -180.0..180.0f64,
        bearing in 0.0..360.0f64,
        distance_km in 0.1..2000.0f64,
    ) {
        let start = GeoPoint::new(lat, lng);
        let probe = destination(start, bearing, distance_km);
        let measured = haversine_km(start, probe);
        prop_assert!(
            (measured - distance_km).abs() < 1e-6 * distance_km.max(1.0),
            "expected {distance_km} km, measured {measured} km"
        );
    }

    // The prefilter contract: no point within the radius may fall outside
    // the box. Probes sit at up to 99.5% of the radius along an arbitrary
    // bearing, including high latitudes where the box must wrap or widen.
    #[test]
    fn the_box_never_excludes_a_point_within_the_radius(
        lat in -89.0..89.0f64,
        lng in -180.0..180.0f64,
        radius_km in 0.1..2000.0f64,
        bearing in 0.0..360.0f64,
        fraction in 0.0..0.995f64,
    ) {
        let center = GeoPoint::new(lat, lng);
        let bounds = bounding_box(center, radius_km);
        let probe = destination(center, bearing, radius_km * fraction);

        prop_assert!(haversine_km(center, probe) <= radius_km);
        prop_assert!(
            bounds.contains(probe),
            "probe {:?} escaped bounds {:?} (center {:?}, radius {} km)",
            probe,
            bounds,
            center,
            radius_km
        );
    }
}
