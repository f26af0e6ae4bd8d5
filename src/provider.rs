//! Route providers.
//!
//! A route provider resolves a directions request into exactly one
//! route or an error. Providers are handed to the session explicitly.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::nav::haversine;
use crate::route::{DirectionsRequest, Route};

/// Endpoints farther than this from the request get a warning.
const ENDPOINT_MISMATCH_M: f64 = 1000.0;

pub trait RouteProvider: Send {
    /// Resolve a request. Blocks until the route is known.
    fn calculate(&self, request: &DirectionsRequest) -> Result<Route>;
}

/// Serves a route loaded from a GPX file.
pub struct GpxRouteProvider {
    route: Route,
}

impl GpxRouteProvider {
    pub fn new(route: Route) -> Self {
        Self { route }
    }

    pub fn from_bytes(data: &[u8], tolerance_m: f64) -> Result<Self> {
        Ok(Self::new(crate::gpx::load_route_bytes(data, tolerance_m)?))
    }

    /// Load with the session's track simplification tolerance.
    pub fn from_config(data: &[u8], config: &SessionConfig) -> Result<Self> {
        Self::from_bytes(data, config.simplify_tolerance_m)
    }
}

impl RouteProvider for GpxRouteProvider {
    fn calculate(&self, request: &DirectionsRequest) -> Result<Route> {
        if let (Some(first), Some(last)) = (self.route.polyline.first(), self.route.polyline.last()) {
            let off_source = haversine(first, &request.source);
            let off_destination = haversine(last, &request.destination);
            if off_source > ENDPOINT_MISMATCH_M || off_destination > ENDPOINT_MISMATCH_M {
                log::warn!(
                    "GPX route endpoints off by {:.0} m / {:.0} m from request",
                    off_source,
                    off_destination
                );
            }
        }

        Ok(self.route.clone())
    }
}
