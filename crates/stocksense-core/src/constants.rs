/// Stocksense system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of recent observations read per consensus recompute.
pub const MAX_RECENT_OBSERVATIONS: usize = 50;

/// Free-text notes are truncated to this many characters at ingestion.
pub const MAX_NOTE_CHARS: usize = 500;

/// Mean Earth radius used for all great-circle math.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Exact statute-mile conversion factor.
pub const KM_PER_MILE: f64 = 1.609344;

/// Kilometers per degree of latitude on the same sphere as
/// [`EARTH_RADIUS_KM`]. Keeping the bounding box and the haversine check on
/// one sphere model is what makes the box prefilter sound.
pub const KM_PER_DEGREE_LAT: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
