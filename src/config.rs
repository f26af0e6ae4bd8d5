//! Session configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};
use crate::route::{Coordinate, DirectionsRequest, TransportMode};

pub const DEFAULT_SOURCE: Coordinate = Coordinate::new(11.267630573827411, 76.97844623089712);
pub const DEFAULT_DESTINATION: Coordinate = Coordinate::new(12.507045, 78.223367);

/// What the navigation screen routes between.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub source: Coordinate,
    pub destination: Coordinate,
    pub mode: TransportMode,
    /// RDP tolerance for routes derived from GPX tracks (meters)
    pub simplify_tolerance_m: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE,
            destination: DEFAULT_DESTINATION,
            mode: TransportMode::Driving,
            simplify_tolerance_m: 50.0,
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn directions_request(&self) -> DirectionsRequest {
        DirectionsRequest {
            source: self.source,
            destination: self.destination,
            mode: self.mode,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, c) in [("source", self.source), ("destination", self.destination)] {
            if !(-90.0..=90.0).contains(&c.lat) || !(-180.0..=180.0).contains(&c.lon) {
                return Err(NavError::Config(format!(
                    "{name} ({}, {}) is outside WGS84 range",
                    c.lat, c.lon
                )));
            }
        }
        if self.simplify_tolerance_m < 0.0 {
            return Err(NavError::Config(format!(
                "simplify_tolerance_m must be non-negative, got {}",
                self.simplify_tolerance_m
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.destination, DEFAULT_DESTINATION);
    }

    #[test]
    fn partial_json_overrides() {
        let json = r#"{"destination": {"lat": 13.0827, "lon": 80.2707}, "simplify_tolerance_m": 10}"#;
        let config = SessionConfig::from_json(json).unwrap();

        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.destination, Coordinate::new(13.0827, 80.2707));
        assert_eq!(config.simplify_tolerance_m, 10.0);
        assert_eq!(config.mode, TransportMode::Driving);
    }

    #[test]
    fn out_of_range_coordinate() {
        let json = r#"{"source": {"lat": 95.0, "lon": 0.0}}"#;
        assert!(matches!(SessionConfig::from_json(json), Err(NavError::Config(_))));
    }

    #[test]
    fn negative_tolerance() {
        let json = r#"{"simplify_tolerance_m": -1.0}"#;
        assert!(matches!(SessionConfig::from_json(json), Err(NavError::Config(_))));
    }

    #[test]
    fn unknown_mode_rejected() {
        let json = r#"{"mode": "walking"}"#;
        assert!(matches!(SessionConfig::from_json(json), Err(NavError::Json(_))));
    }

    #[test]
    fn load_missing_file() {
        assert!(matches!(
            SessionConfig::load("/nonexistent/routeguide.json"),
            Err(NavError::Io(_))
        ));
    }

    #[test]
    fn directions_request_mirrors_config() {
        let request = SessionConfig::default().directions_request();
        assert_eq!(request.source, DEFAULT_SOURCE);
        assert_eq!(request.destination, DEFAULT_DESTINATION);
        assert_eq!(request.mode, TransportMode::Driving);
    }
}
