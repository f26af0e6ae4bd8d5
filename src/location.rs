//! Location sources.
//!
//! A location source asks for authorization once, then yields location
//! events until it runs dry. Frequency and accuracy are up to the
//! source; consumers must cope with any of it, including nothing.

use std::io::Read;
use std::time::Duration;

use crate::error::Result;
use crate::route::Coordinate;

/// Outcome of the authorization prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
    Restricted,
}

/// A single position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationUpdate {
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationEvent {
    Update(LocationUpdate),
    /// The source fired but had no position.
    Unavailable,
}

/// Producer of user location events.
pub trait LocationSource: Send {
    fn request_authorization(&mut self) -> Authorization;

    /// Next event, blocking as long as needed. `None` ends the stream.
    fn next_event(&mut self) -> Option<LocationEvent>;
}

/// Replays a fixed list of events, e.g. a recorded GPX track.
pub struct ReplaySource {
    events: std::vec::IntoIter<LocationEvent>,
    authorization: Authorization,
    interval: Option<Duration>,
}

impl ReplaySource {
    pub fn new(events: Vec<LocationEvent>) -> Self {
        Self {
            events: events.into_iter(),
            authorization: Authorization::Granted,
            interval: None,
        }
    }

    pub fn from_coordinates(points: impl IntoIterator<Item = Coordinate>) -> Self {
        Self::new(
            points
                .into_iter()
                .map(|coordinate| LocationEvent::Update(LocationUpdate { coordinate }))
                .collect(),
        )
    }

    /// Replay every track point of a GPX file.
    pub fn from_gpx<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_coordinates(crate::gpx::read_track(reader)?))
    }

    /// Answer the authorization prompt with `authorization`.
    pub fn authorization(mut self, authorization: Authorization) -> Self {
        self.authorization = authorization;
        self
    }

    /// Sleep this long before each event.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }
}

impl LocationSource for ReplaySource {
    fn request_authorization(&mut self) -> Authorization {
        self.authorization
    }

    fn next_event(&mut self) -> Option<LocationEvent> {
        let event = self.events.next()?;
        if let Some(interval) = self.interval {
            std::thread::sleep(interval);
        }
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn replay_yields_in_order() {
        let mut source = ReplaySource::from_coordinates([pt(1.0, 1.0), pt(2.0, 2.0)]);

        assert_eq!(source.request_authorization(), Authorization::Granted);
        assert_eq!(
            source.next_event(),
            Some(LocationEvent::Update(LocationUpdate { coordinate: pt(1.0, 1.0) }))
        );
        assert_eq!(
            source.next_event(),
            Some(LocationEvent::Update(LocationUpdate { coordinate: pt(2.0, 2.0) }))
        );
        assert_eq!(source.next_event(), None);
    }

    #[test]
    fn replay_keeps_unavailable_events() {
        let mut source = ReplaySource::new(vec![LocationEvent::Unavailable]);
        assert_eq!(source.next_event(), Some(LocationEvent::Unavailable));
    }

    #[test]
    fn replay_authorization_override() {
        let mut source = ReplaySource::new(vec![]).authorization(Authorization::Denied);
        assert_eq!(source.request_authorization(), Authorization::Denied);
    }

    #[test]
    fn replay_interval_paces_events() {
        let interval = Duration::from_millis(20);
        let mut source = ReplaySource::from_coordinates([pt(1.0, 1.0), pt(2.0, 2.0)])
            .interval(interval);

        let started = std::time::Instant::now();
        while source.next_event().is_some() {}
        let elapsed = started.elapsed();

        assert!(elapsed >= interval * 2, "events came too fast: {elapsed:?}");
    }

    #[test]
    fn replay_interval_not_spent_after_end() {
        let mut source = ReplaySource::new(vec![]).interval(Duration::from_secs(5));

        let started = std::time::Instant::now();
        assert_eq!(source.next_event(), None);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn replay_from_gpx_track() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"
     xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="11.2676" lon="76.9784"></trkpt>
      <trkpt lat="11.2700" lon="76.9800"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

        let mut source = ReplaySource::from_gpx(gpx.as_bytes()).unwrap();
        let mut count = 0;
        while let Some(event) = source.next_event() {
            assert!(matches!(event, LocationEvent::Update(_)));
            count += 1;
        }
        assert_eq!(count, 2);
    }
}
