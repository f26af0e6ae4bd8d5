//! Turn-by-turn step generation.
//!
//! Derives route steps from sparse route waypoints. Each step carries
//! the along-route distance from its waypoint to the destination, so
//! thresholds descend in stored order. Platform-agnostic.

use crate::nav::{bearing, distances_to_end, haversine};
use crate::route::{Coordinate, RouteStep};

/// Turn direction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Start,
    Straight,
    SlightLeft,
    Left,
    SharpLeft,
    SlightRight,
    Right,
    SharpRight,
    UTurn,
    Arrive,
}

impl Turn {
    pub fn text(self) -> &'static str {
        match self {
            Turn::Start => "start navigation",
            Turn::Straight => "continue straight",
            Turn::SlightLeft => "keep slightly left",
            Turn::Left => "turn left",
            Turn::SharpLeft => "turn sharp left",
            Turn::SlightRight => "keep slightly right",
            Turn::Right => "turn right",
            Turn::SharpRight => "turn sharp right",
            Turn::UTurn => "make a U-turn",
            Turn::Arrive => "arrive at destination",
        }
    }
}

/// Generate route steps for a list of waypoints.
///
/// Step 0 is the start, every interior waypoint gets the turn made
/// there, the last waypoint is the arrival. Fewer than 2 waypoints
/// produce no steps.
pub fn generate_steps(waypoints: &[Coordinate]) -> Vec<RouteStep> {
    if waypoints.len() < 2 {
        return Vec::new();
    }

    let remaining = distances_to_end(waypoints);
    let mut steps = Vec::with_capacity(waypoints.len());

    steps.push(RouteStep::new("Start navigation", remaining[0]));

    for i in 1..waypoints.len() - 1 {
        let dist = haversine(&waypoints[i - 1], &waypoints[i]);
        let turn = compute_turn(&waypoints[i - 1], &waypoints[i], &waypoints[i + 1]);

        steps.push(RouteStep::new(
            format!("In {}, {}", format_distance(dist), turn.text()),
            remaining[i],
        ));
    }

    let last = waypoints.len() - 1;
    let dist = haversine(&waypoints[last - 1], &waypoints[last]);
    steps.push(RouteStep::new(
        format!("In {}, {}", format_distance(dist), Turn::Arrive.text()),
        remaining[last],
    ));

    steps
}

/// Turn made at waypoint B when arriving from A and leaving toward C.
///
/// Names the maneuver in the instruction of B's step.
fn compute_turn(a: &Coordinate, b: &Coordinate, c: &Coordinate) -> Turn {
    let bearing_ab = bearing(a, b);
    let bearing_bc = bearing(b, c);

    // Positive = right turn, negative = left turn
    let mut angle = bearing_bc - bearing_ab;

    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }

    classify_turn(angle)
}

/// Classify a relative bearing angle into a turn direction.
///
/// Bands in degrees: up to 20 straight, 60 slight, 120 normal,
/// 170 sharp, beyond that a U-turn.
pub fn classify_turn(angle: f64) -> Turn {
    let abs_angle = angle.abs();

    if abs_angle > 170.0 {
        Turn::UTurn
    } else if abs_angle > 120.0 {
        if angle > 0.0 { Turn::SharpRight } else { Turn::SharpLeft }
    } else if abs_angle > 60.0 {
        if angle > 0.0 { Turn::Right } else { Turn::Left }
    } else if abs_angle > 20.0 {
        if angle > 0.0 { Turn::SlightRight } else { Turn::SlightLeft }
    } else {
        Turn::Straight
    }
}

/// Distance as shown in instruction text: whole 10 m below a
/// kilometre, one decimal in km from there on.
pub fn format_distance(meters: f64) -> String {
    let rounded_m = (meters / 10.0).round() as i64 * 10;
    if rounded_m >= 1000 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{rounded_m} m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn classify_straight() {
        assert_eq!(classify_turn(5.0), Turn::Straight);
        assert_eq!(classify_turn(-10.0), Turn::Straight);
    }

    #[test]
    fn classify_right_turn() {
        assert_eq!(classify_turn(90.0), Turn::Right);
        assert_eq!(classify_turn(-90.0), Turn::Left);
    }

    #[test]
    fn classify_u_turn() {
        assert_eq!(classify_turn(175.0), Turn::UTurn);
        assert_eq!(classify_turn(-175.0), Turn::UTurn);
    }

    #[test]
    fn generate_straight_route() {
        let route = vec![pt(48.0, 16.0), pt(48.5, 16.0), pt(49.0, 16.0)];
        let steps = generate_steps(&route);

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].instruction, "Start navigation");
        assert!(steps[1].instruction.ends_with("continue straight"),
            "got {:?}", steps[1].instruction);
        assert!(steps[2].instruction.ends_with("arrive at destination"));
    }

    #[test]
    fn generate_right_turn() {
        // North then east
        let route = vec![pt(48.0, 16.0), pt(48.5, 16.0), pt(48.5, 17.0)];
        let steps = generate_steps(&route);

        assert_eq!(steps.len(), 3);
        assert!(steps[1].instruction.ends_with("turn right"),
            "got {:?}", steps[1].instruction);
    }

    #[test]
    fn thresholds_descend_to_zero() {
        let route = vec![pt(48.0, 16.0), pt(48.5, 16.0), pt(48.5, 17.0)];
        let steps = generate_steps(&route);

        assert!(steps[0].distance_to_destination_m > steps[1].distance_to_destination_m);
        assert!(steps[1].distance_to_destination_m > steps[2].distance_to_destination_m);
        assert_eq!(steps[2].distance_to_destination_m, 0.0);
    }

    #[test]
    fn generate_too_few_points() {
        assert!(generate_steps(&[pt(48.0, 16.0)]).is_empty());
        assert!(generate_steps(&[]).is_empty());
    }

    #[test]
    fn generate_two_points() {
        let steps = generate_steps(&[pt(48.0, 16.0), pt(49.0, 16.0)]);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].instruction, "Start navigation");
        assert!(steps[1].instruction.starts_with("In 111."),
            "got {:?}", steps[1].instruction);
    }

    #[test]
    fn format_distance_meters() {
        assert_eq!(format_distance(150.0), "150 m");
        assert_eq!(format_distance(5.0), "10 m");
    }

    #[test]
    fn format_distance_km() {
        assert_eq!(format_distance(2500.0), "2.5 km");
    }

    #[test]
    fn format_distance_rounds_up_into_km() {
        assert_eq!(format_distance(999.6), "1.0 km");
        assert_eq!(format_distance(996.0), "1.0 km");
        assert_eq!(format_distance(994.0), "990 m");
    }
}
