//! Navigation tracker.
//!
//! Holds at most one route and picks the instruction to display for
//! each user location. The selection itself is a pair of pure
//! functions so it can be exercised without any platform callbacks.

use crate::location::LocationEvent;
use crate::nav::haversine;
use crate::route::{Coordinate, Route, RouteStep};

/// Remaining distance for a user position, in meters.
///
/// Measured as the route's total distance minus the distance from the
/// user to the route anchor (first polyline point). Not clamped: it
/// goes negative once the user is farther from the anchor than the
/// route is long. `None` when the route has no polyline.
pub fn remaining_distance(route: &Route, user: &Coordinate) -> Option<f64> {
    let anchor = route.anchor()?;
    Some(route.total_distance_m - haversine(user, &anchor))
}

/// First step in stored order whose threshold is at most `remaining_m`.
pub fn select_step(steps: &[RouteStep], remaining_m: f64) -> Option<&RouteStep> {
    steps
        .iter()
        .find(|s| s.distance_to_destination_m <= remaining_m)
}

/// Tracker state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RouteState {
    #[default]
    NoRoute,
    HasRoute(Route),
}

#[derive(Debug, Default)]
pub struct NavigationTracker {
    state: RouteState,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RouteState {
        &self.state
    }

    pub fn route(&self) -> Option<&Route> {
        match &self.state {
            RouteState::NoRoute => None,
            RouteState::HasRoute(route) => Some(route),
        }
    }

    /// Replace any previously held route.
    pub fn set_route(&mut self, route: Route) {
        log::debug!(
            "Route set: {} steps, {:.0} m",
            route.steps.len(),
            route.total_distance_m
        );
        self.state = RouteState::HasRoute(route);
    }

    /// Instruction for the user's current position.
    ///
    /// Returns `None` without a route, or when no step matches; callers
    /// keep displaying whatever they showed before.
    pub fn on_location_update(&self, user: &Coordinate) -> Option<&str> {
        let RouteState::HasRoute(route) = &self.state else {
            return None;
        };

        let remaining = remaining_distance(route, user)?;
        let step = select_step(&route.steps, remaining);

        log::trace!(
            "Remaining {:.0} m, step {:?}",
            remaining,
            step.map(|s| s.instruction.as_str())
        );

        step.map(|s| s.instruction.as_str())
    }

    /// Same as [`on_location_update`](Self::on_location_update), skipping
    /// unavailable locations.
    pub fn on_location_event(&self, event: &LocationEvent) -> Option<&str> {
        match event {
            LocationEvent::Update(update) => self.on_location_update(&update.coordinate),
            LocationEvent::Unavailable => None,
        }
    }
}
