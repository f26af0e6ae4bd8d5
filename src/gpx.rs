//! GPX 1.1 input.
//!
//! Wraps the `gpx` crate to turn planned routes or recorded tracks into
//! navigable [`Route`]s, and to read tracks for location replay.

use std::io::Read;

use crate::convert::simplify;
use crate::error::{NavError, Result};
use crate::nav::polyline_length;
use crate::route::{Coordinate, Route};
use crate::route_nav::generate_steps;

fn to_coordinate(wp: &gpx::Waypoint) -> Coordinate {
    let p = wp.point();
    Coordinate { lat: p.y(), lon: p.x() }
}

/// Load a navigable route from GPX.
///
/// The first `<rte>` is used as-is: its points are both polyline and
/// step waypoints. Without a route, the first `<trk>` is used: the
/// polyline keeps every track point and steps are generated from the
/// track simplified with `tolerance_m`.
pub fn load_route<R: Read>(reader: R, tolerance_m: f64) -> Result<Route> {
    let gpx = gpx::read(reader)?;

    let (polyline, waypoints) = if let Some(rte) = gpx.routes.first() {
        let points: Vec<Coordinate> = rte.points.iter().map(to_coordinate).collect();
        (points.clone(), points)
    } else if let Some(trk) = gpx.tracks.first() {
        let points: Vec<Coordinate> = trk
            .segments
            .iter()
            .flat_map(|seg| seg.points.iter())
            .map(to_coordinate)
            .collect();
        let simplified = simplify(&points, tolerance_m);
        (points, simplified)
    } else {
        return Err(NavError::NoRoute);
    };

    if polyline.len() < 2 {
        return Err(NavError::NoRoute);
    }

    log::debug!(
        "GPX route: {} polyline points, {} waypoints",
        polyline.len(),
        waypoints.len()
    );

    Ok(Route {
        steps: generate_steps(&waypoints),
        total_distance_m: polyline_length(&polyline),
        polyline,
    })
}

/// Load a route from a byte slice. Convenience wrapper for JNI.
pub fn load_route_bytes(data: &[u8], tolerance_m: f64) -> Result<Route> {
    load_route(data, tolerance_m)
}

/// Read every track point of a GPX file, in order.
///
/// Multi-segment and multi-track files are flattened.
pub fn read_track<R: Read>(reader: R) -> Result<Vec<Coordinate>> {
    let gpx = gpx::read(reader)?;

    Ok(gpx
        .tracks
        .iter()
        .flat_map(|t| t.segments.iter())
        .flat_map(|seg| seg.points.iter())
        .map(to_coordinate)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"
     xmlns="http://www.topografix.com/GPX/1/1">
  <rte>
    <name>Test Route</name>
    <rtept lat="48.0" lon="16.0"></rtept>
    <rtept lat="48.5" lon="16.0"></rtept>
    <rtept lat="48.5" lon="17.0"></rtept>
  </rte>
  <trk>
    <trkseg>
      <trkpt lat="10.0" lon="10.0"></trkpt>
      <trkpt lat="10.1" lon="10.1"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    const TRACK_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"
     xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Multi Segment</name>
    <trkseg>
      <trkpt lat="48.0" lon="16.0"></trkpt>
      <trkpt lat="48.0" lon="16.01"></trkpt>
      <trkpt lat="48.0" lon="16.02"></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="48.01" lon="16.02"></trkpt>
      <trkpt lat="48.02" lon="16.02"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn load_route_prefers_rte() {
        let route = load_route_bytes(ROUTE_GPX.as_bytes(), 50.0).unwrap();

        assert_eq!(route.polyline.len(), 3);
        assert_eq!(route.steps.len(), 3);
        assert!((route.polyline[0].lat - 48.0).abs() < 1e-6);
        assert!(route.steps[1].instruction.ends_with("turn right"));
        assert!((route.total_distance_m - polyline_length(&route.polyline)).abs() < 1e-6);
    }

    #[test]
    fn load_route_from_track_simplifies_steps() {
        let route = load_route_bytes(TRACK_GPX.as_bytes(), 10.0).unwrap();

        // Polyline keeps all points, steps only start, corner, arrival
        assert_eq!(route.polyline.len(), 5);
        assert_eq!(route.steps.len(), 3);
        assert!(route.steps[1].instruction.ends_with("turn left"),
            "got {:?}", route.steps[1].instruction);
    }

    #[test]
    fn load_route_empty_gpx_is_no_route() {
        let empty = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"
     xmlns="http://www.topografix.com/GPX/1/1">
</gpx>"#;

        assert!(matches!(load_route_bytes(empty.as_bytes(), 50.0), Err(NavError::NoRoute)));
    }

    #[test]
    fn load_route_single_point_is_no_route() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"
     xmlns="http://www.topografix.com/GPX/1/1">
  <rte><rtept lat="48.0" lon="16.0"></rtept></rte>
</gpx>"#;

        assert!(matches!(load_route_bytes(gpx.as_bytes(), 50.0), Err(NavError::NoRoute)));
    }

    #[test]
    fn load_route_invalid_xml() {
        assert!(matches!(load_route_bytes(b"not xml at all", 50.0), Err(NavError::Gpx(_))));
    }

    #[test]
    fn read_track_flattens_segments() {
        let points = read_track(TRACK_GPX.as_bytes()).unwrap();

        assert_eq!(points.len(), 5);
        assert!((points[4].lat - 48.02).abs() < 1e-6);
        assert!((points[4].lon - 16.02).abs() < 1e-6);
    }

    #[test]
    fn read_track_ignores_routes() {
        let points = read_track(ROUTE_GPX.as_bytes()).unwrap();
        assert_eq!(points.len(), 2);
    }
}
