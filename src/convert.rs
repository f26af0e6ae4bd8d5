//! Track simplification.
//!
//! Reduces a dense recorded track to sparse waypoints with the
//! Ramer-Douglas-Peucker algorithm, so step generation only sees the
//! major direction changes.

use crate::route::Coordinate;

/// Simplify a polyline with Ramer-Douglas-Peucker.
///
/// `tolerance_m` controls simplification aggressiveness. Typical values:
/// - 10.0: light simplification, keeps most detail
/// - 50.0: moderate, good for navigation waypoints
/// - 100.0: aggressive, only major direction changes
pub fn simplify(points: &[Coordinate], tolerance_m: f64) -> Vec<Coordinate> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let first = &points[0];
    let last = &points[points.len() - 1];

    // The interior point that strays farthest from the chord is the
    // strongest candidate for a turn waypoint
    let mut max_dist = 0.0;
    let mut max_idx = 0;

    for (i, p) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance_m(p, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > tolerance_m {
        // Keep it as a waypoint and look for more turns on each side
        let mut left = simplify(&points[..=max_idx], tolerance_m);
        let right = simplify(&points[max_idx..], tolerance_m);

        // Junction point is in both halves
        left.pop();
        left.extend(right);
        left
    } else {
        // Nothing worth a turn instruction between the endpoints
        vec![*first, *last]
    }
}

/// Perpendicular distance from point P to the line through A and B, in meters.
///
/// Uses a planar approximation with latitude-cosine scaling. Good
/// enough to compare against a tolerance of tens of meters; route
/// lengths themselves always come from `nav::haversine`.
fn perpendicular_distance_m(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    let cos_lat = ((a.lat + b.lat) / 2.0).to_radians().cos();

    let m_per_deg_lat = 111_320.0;
    let m_per_deg_lon = 111_320.0 * cos_lat;

    let ax = a.lon * m_per_deg_lon;
    let ay = a.lat * m_per_deg_lat;
    let bx = b.lon * m_per_deg_lon;
    let by = b.lat * m_per_deg_lat;
    let px = p.lon * m_per_deg_lon;
    let py = p.lat * m_per_deg_lat;

    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    // Closed loop (first == last): fall back to distance from A
    if len_sq < 1e-10 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }

    let cross = ((px - ax) * dy - (py - ay) * dx).abs();
    cross / len_sq.sqrt()
}
