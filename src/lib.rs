pub mod android_jni;
pub mod config;
pub mod convert;
pub mod error;
pub mod gpx;
pub mod location;
pub mod nav;
pub mod osrm;
pub mod provider;
pub mod route;
pub mod route_nav;
pub mod session;
pub mod tracker;

pub use error::{NavError, Result};
pub use route::{Coordinate, DirectionsRequest, Route, RouteStep, TransportMode};
pub use tracker::NavigationTracker;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
