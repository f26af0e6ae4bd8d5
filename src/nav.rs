//! Geodesic computations.
//!
//! Platform-agnostic distance and bearing helpers. All coordinates use
//! WGS84 (lat/lon in degrees).

use crate::route::Coordinate;

/// Earth radius in meters (WGS84 mean).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Haversine distance between two points in meters.
///
/// This is the geodesic distance for remaining-distance computation,
/// route lengths and step thresholds alike, so all of them agree.
pub fn haversine(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Total length of a polyline in meters.
pub fn polyline_length(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine(&w[0], &w[1]))
        .sum()
}

/// Along-polyline distance from each point to the last point, in meters.
///
/// The returned vector has the same length as `points`; the last entry is 0.
pub fn distances_to_end(points: &[Coordinate]) -> Vec<f64> {
    let mut remaining = vec![0.0; points.len()];
    for i in (0..points.len().saturating_sub(1)).rev() {
        remaining[i] = remaining[i + 1] + haversine(&points[i], &points[i + 1]);
    }
    remaining
}

/// Initial bearing from point A to point B in degrees [0, 360).
///
/// Step generation compares consecutive bearings to name turns.
pub fn bearing(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    let bearing = y.atan2(x).to_degrees();
    (bearing + 360.0) % 360.0
}
