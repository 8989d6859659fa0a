use crate::model::office::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Accepted distance between a scan and its office. The business requirement
/// is 20 m; the extra 30 m absorbs consumer GPS error. Not configurable.
pub const GEOFENCE_RADIUS_METERS: f64 = 50.0;

/// Great-circle distance in meters (haversine).
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Inclusive: a scan exactly on the boundary is accepted.
pub fn is_within_range(distance: f64, threshold_meters: f64) -> bool {
    distance <= threshold_meters
}
