//! Route data model.
//!
//! Routes are produced once by a route provider and never mutated
//! afterwards. All coordinates use WGS84 (lat/lon in degrees), all
//! distances are in meters.

use serde::{Deserialize, Serialize};

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One instruction segment of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Human-readable instruction text.
    pub instruction: String,
    /// The step becomes eligible once the remaining distance is at
    /// least this many meters.
    pub distance_to_destination_m: f64,
}

impl RouteStep {
    pub fn new(instruction: impl Into<String>, distance_to_destination_m: f64) -> Self {
        Self {
            instruction: instruction.into(),
            distance_to_destination_m,
        }
    }
}

/// A resolved route between two coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Steps in traversal order, origin first.
    pub steps: Vec<RouteStep>,
    /// Total route length in meters.
    pub total_distance_m: f64,
    /// Route geometry.
    pub polyline: Vec<Coordinate>,
}

impl Route {
    /// The reference point remaining distance is measured against.
    ///
    /// This is the first recorded polyline point, not the destination.
    pub fn anchor(&self) -> Option<Coordinate> {
        self.polyline.first().copied()
    }

    pub fn first_instruction(&self) -> Option<&str> {
        self.steps.first().map(|s| s.instruction.as_str())
    }
}

/// Transport mode for a directions request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Driving,
}

impl TransportMode {
    /// Profile name as used by routing services.
    pub fn profile(self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
        }
    }
}

/// What a route provider is asked to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub source: Coordinate,
    pub destination: Coordinate,
    pub mode: TransportMode,
}
