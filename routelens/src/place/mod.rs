//! Place selection adapter.
//!
//! Wraps an external autocomplete capability behind a subscription
//! contract: the adapter emits resolved places (coordinate plus backend
//! identifier) into a channel as the user picks suggestions. The core
//! consumes resolved places; it never geocodes.

use tokio::sync::mpsc;

use crate::coord::LatLon;

/// A place resolved by the autocomplete capability.
///
/// Immutable once resolved. `coordinate` is optional because a typed-in
/// query that was never picked from the suggestions carries no geometry;
/// route requests fail fast on such places.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Opaque identifier assigned by the places backend.
    pub id: String,
    /// Resolved coordinate, absent until the user picks a suggestion.
    pub coordinate: Option<LatLon>,
    /// Display label (name or formatted address).
    pub label: String,
}

impl Place {
    /// Create a place.
    pub fn new(id: impl Into<String>, coordinate: Option<LatLon>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coordinate,
            label: label.into(),
        }
    }

    /// Create a fully resolved place.
    pub fn resolved(id: impl Into<String>, lat: f64, lon: f64, label: impl Into<String>) -> Self {
        Self::new(id, Some(LatLon::new(lat, lon)), label)
    }

    /// Whether this place can be used as a route endpoint.
    pub fn is_resolved(&self) -> bool {
        self.coordinate.is_some()
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Which route endpoint a resolved place fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceSlot {
    /// Trip start.
    Origin,
    /// Trip end.
    Destination,
}

/// A resolved place arriving from the autocomplete capability.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceEvent {
    /// Which endpoint the place fills.
    pub slot: PlaceSlot,
    /// The resolved place.
    pub place: Place,
}

/// Source of resolved places.
///
/// Implementations push a [`PlaceEvent`] into the sink whenever the user
/// resolves a suggestion. The subscription lives until the sender side is
/// dropped.
pub trait PlaceSelector: Send + Sync {
    /// Begin emitting place events into the given sink.
    fn subscribe(&self, sink: mpsc::UnboundedSender<PlaceEvent>);
}

/// Latest resolved endpoints, fed from a [`PlaceSelector`] subscription.
///
/// Holds whatever the user most recently resolved for each slot. The
/// route coordinator reads both; a missing or unresolved endpoint makes
/// the request fail fast rather than silently doing nothing.
#[derive(Debug, Clone, Default)]
pub struct EndpointState {
    origin: Option<Place>,
    destination: Option<Place>,
}

impl EndpointState {
    /// Create an empty endpoint state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved place event.
    pub fn apply(&mut self, event: PlaceEvent) {
        match event.slot {
            PlaceSlot::Origin => self.origin = Some(event.place),
            PlaceSlot::Destination => self.destination = Some(event.place),
        }
    }

    /// Latest origin, if any.
    pub fn origin(&self) -> Option<&Place> {
        self.origin.as_ref()
    }

    /// Latest destination, if any.
    pub fn destination(&self) -> Option<&Place> {
        self.destination.as_ref()
    }

    /// Both endpoints, when both are present.
    pub fn pair(&self) -> Option<(&Place, &Place)> {
        match (&self.origin, &self.destination) {
            (Some(o), Some(d)) => Some((o, d)),
            _ => None,
        }
    }
}

/// Selector that emits a fixed list of events immediately.
///
/// Used by the CLI (coordinates arrive as arguments, not keystrokes) and
/// in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPlaceSelector {
    events: Vec<PlaceEvent>,
}

impl StaticPlaceSelector {
    /// Create a selector that will emit the given events, in order.
    pub fn new(events: Vec<PlaceEvent>) -> Self {
        Self { events }
    }

    /// Convenience constructor for an origin/destination pair.
    pub fn pair(origin: Place, destination: Place) -> Self {
        Self::new(vec![
            PlaceEvent {
                slot: PlaceSlot::Origin,
                place: origin,
            },
            PlaceEvent {
                slot: PlaceSlot::Destination,
                place: destination,
            },
        ])
    }
}

impl PlaceSelector for StaticPlaceSelector {
    fn subscribe(&self, sink: mpsc::UnboundedSender<PlaceEvent>) {
        for event in &self.events {
            // Receiver may already be gone; nothing to do then.
            let _ = sink.send(event.clone());
        }
    }
}
