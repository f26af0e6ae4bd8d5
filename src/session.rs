//! Navigation session.
//!
//! Drives one navigation screen: a single route request and a location
//! stream, both running on their own threads and reporting into one
//! channel. Events are consumed on the caller's thread, which is the
//! only place the tracker and the view are touched.
//!
//! Every failure ends in "nothing happens": a failed route leaves the
//! map unrouted, denied authorization yields no updates, and an
//! unavailable location is skipped.

use std::sync::mpsc::{self, Sender};
use std::thread;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::location::{Authorization, LocationEvent, LocationSource};
use crate::provider::RouteProvider;
use crate::route::{Coordinate, Route};
use crate::tracker::NavigationTracker;

/// UI layer of the navigation screen.
pub trait NavigationView {
    /// Drop a pin at a fixed point (source and destination).
    fn show_pin(&mut self, at: Coordinate);

    /// Called once per successfully resolved route.
    fn render_route(&mut self, route: &Route);

    /// Called on route resolution with the first step, then once per
    /// location update with whatever the tracker selected. `None` means
    /// nothing matched; the view keeps its current instruction.
    fn show_instruction(&mut self, instruction: Option<&str>);
}

#[derive(Debug)]
pub enum SessionEvent {
    RouteResolved(Result<Route>),
    Location(LocationEvent),
}

pub struct NavigationSession<P, L> {
    config: SessionConfig,
    provider: P,
    source: L,
}

impl<P, L> NavigationSession<P, L>
where
    P: RouteProvider + 'static,
    L: LocationSource + 'static,
{
    pub fn new(config: SessionConfig, provider: P, source: L) -> Self {
        Self {
            config,
            provider,
            source,
        }
    }

    /// Run the session until the route request and the location stream
    /// have both finished, returning the final tracker.
    pub fn run<V: NavigationView>(self, view: &mut V) -> NavigationTracker {
        let Self {
            config,
            provider,
            source,
        } = self;

        view.show_pin(config.source);
        view.show_pin(config.destination);

        let (tx, rx) = mpsc::channel();

        let request = config.directions_request();
        let route_tx = tx.clone();
        let route_thread = thread::spawn(move || {
            let result = provider.calculate(&request);
            // Receiver outlives both producers
            let _ = route_tx.send(SessionEvent::RouteResolved(result));
        });

        let location_thread = thread::spawn(move || stream_locations(source, tx));

        let mut tracker = NavigationTracker::new();
        for event in rx {
            handle_event(&mut tracker, event, view);
        }

        for (name, handle) in [("route", route_thread), ("location", location_thread)] {
            if handle.join().is_err() {
                log::warn!("{name} thread panicked");
            }
        }

        tracker
    }
}

fn stream_locations<L: LocationSource>(mut source: L, tx: Sender<SessionEvent>) {
    match source.request_authorization() {
        Authorization::Granted => {}
        denied => {
            log::info!("Location authorization {denied:?}, no updates");
            return;
        }
    }

    while let Some(event) = source.next_event() {
        if tx.send(SessionEvent::Location(event)).is_err() {
            break;
        }
    }

    log::debug!("Location stream ended");
}

/// Apply one session event to the tracker and the view.
pub fn handle_event<V: NavigationView>(
    tracker: &mut NavigationTracker,
    event: SessionEvent,
    view: &mut V,
) {
    match event {
        SessionEvent::RouteResolved(Ok(route)) => {
            log::info!(
                "Route resolved: {:.0} m, {} steps",
                route.total_distance_m,
                route.steps.len()
            );
            view.render_route(&route);
            view.show_instruction(route.first_instruction());
            tracker.set_route(route);
        }
        SessionEvent::RouteResolved(Err(e)) => {
            log::debug!("Route request failed: {e}");
        }
        SessionEvent::Location(LocationEvent::Unavailable) => {
            log::debug!("Location unavailable, skipping update");
        }
        SessionEvent::Location(event) => {
            view.show_instruction(tracker.on_location_event(&event));
        }
    }
}
