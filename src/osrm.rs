//! OSRM routing service.
//!
//! Decodes `route/v1` responses requested with `steps=true` and
//! `geometries=geojson`. The HTTP client lives behind the `osrm`
//! feature; the decoder is always available.

use serde::Deserialize;

use crate::error::{NavError, Result};
use crate::route::{Coordinate, DirectionsRequest, Route, RouteStep};
use crate::route_nav::Turn;

#[derive(Debug, Deserialize)]
struct Response {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    geometry: Geometry,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// GeoJSON order: [lon, lat]
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    distance: f64,
    #[serde(default)]
    name: String,
    maneuver: Maneuver,
}

#[derive(Debug, Deserialize)]
struct Maneuver {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    modifier: Option<String>,
}

/// Build the `route/v1` URL for a request.
pub fn request_url(base_url: &str, request: &DirectionsRequest) -> String {
    format!(
        "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson&steps=true",
        base_url.trim_end_matches('/'),
        request.mode.profile(),
        request.source.lon,
        request.source.lat,
        request.destination.lon,
        request.destination.lat,
    )
}

/// Decode an OSRM response body into the first route it contains.
///
/// Step thresholds are the distance from the start of each step to the
/// destination, i.e. the suffix sums of step lengths.
pub fn parse_response(body: &str) -> Result<Route> {
    let response: Response = serde_json::from_str(body)?;

    if response.code != "Ok" {
        log::debug!(
            "OSRM returned {}: {}",
            response.code,
            response.message.as_deref().unwrap_or("")
        );
        return Err(NavError::NoRoute);
    }

    let route = response.routes.into_iter().next().ok_or(NavError::NoRoute)?;

    let steps: Vec<&Step> = route.legs.iter().flat_map(|l| l.steps.iter()).collect();
    let mut remaining: f64 = steps.iter().map(|s| s.distance).sum();
    let mut route_steps = Vec::with_capacity(steps.len());
    for step in steps {
        route_steps.push(RouteStep::new(instruction_text(step), remaining));
        remaining -= step.distance;
    }

    Ok(Route {
        steps: route_steps,
        total_distance_m: route.distance,
        polyline: route
            .geometry
            .coordinates
            .iter()
            .map(|[lon, lat]| Coordinate { lat: *lat, lon: *lon })
            .collect(),
    })
}

fn modifier_turn(modifier: Option<&str>) -> Option<Turn> {
    Some(match modifier? {
        "uturn" => Turn::UTurn,
        "sharp right" => Turn::SharpRight,
        "right" => Turn::Right,
        "slight right" => Turn::SlightRight,
        "straight" => Turn::Straight,
        "slight left" => Turn::SlightLeft,
        "left" => Turn::Left,
        "sharp left" => Turn::SharpLeft,
        _ => return None,
    })
}

fn instruction_text(step: &Step) -> String {
    let onto = |text: &str| {
        if step.name.is_empty() {
            capitalize(text)
        } else {
            format!("{} onto {}", capitalize(text), step.name)
        }
    };

    match step.maneuver.kind.as_str() {
        "depart" => onto(Turn::Start.text()),
        "arrive" => capitalize(Turn::Arrive.text()),
        "roundabout" | "rotary" => onto("enter the roundabout"),
        _ => match modifier_turn(step.maneuver.modifier.as_deref()) {
            Some(turn) => onto(turn.text()),
            None => onto("continue"),
        },
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(feature = "osrm")]
pub use client::OsrmProvider;

#[cfg(feature = "osrm")]
mod client {
    use super::{parse_response, request_url};
    use crate::error::Result;
    use crate::provider::RouteProvider;
    use crate::route::{DirectionsRequest, Route};

    /// Route provider backed by an OSRM HTTP endpoint.
    pub struct OsrmProvider {
        base_url: String,
        client: reqwest::blocking::Client,
    }

    impl OsrmProvider {
        pub fn new(base_url: impl Into<String>) -> Result<Self> {
            // A pending request simply never resolves the route
            let client = reqwest::blocking::Client::builder()
                .timeout(None)
                .build()?;

            Ok(Self {
                base_url: base_url.into(),
                client,
            })
        }
    }

    impl RouteProvider for OsrmProvider {
        fn calculate(&self, request: &DirectionsRequest) -> Result<Route> {
            let url = request_url(&self.base_url, request);
            log::debug!("OSRM request: {url}");

            let body = self.client.get(url).send()?.error_for_status()?.text()?;
            parse_response(&body)
        }
    }
}
