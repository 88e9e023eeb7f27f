//! Waypoint reconstruction and turn-by-turn directions.
//!
//! The route backend returns raw geometry; it does not phrase turn
//! instructions. An external directions provider does, but it accepts a
//! bounded number of intermediate waypoints and will not retrace an
//! arbitrary path. This module thins a candidate's dense path down to a
//! waypoint list that fits the provider's cap while preserving the route
//! shape, then asks the provider for detailed steps along those waypoints
//! with reordering disabled.
//!
//! The provider is used only to obtain human-phrased instructions
//! consistent with the approved path, never to recompute route choice.

mod google;
mod sampling;

pub use google::GoogleDirectionsProvider;
pub use sampling::{sample_waypoints, DENSE_PATH_THRESHOLD, MAX_WAYPOINTS};

use crate::coord::LatLon;
use crate::error::RouteError;
use crate::place::Place;
use crate::route::RouteCandidate;

/// Travel mode for a directions request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    /// On foot.
    Walking,
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelMode::Walking => write!(f, "walking"),
        }
    }
}

/// A request for detailed turn-by-turn directions.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    /// Trip origin.
    pub origin: LatLon,
    /// Trip destination.
    pub destination: LatLon,
    /// Ordered intermediate waypoints; empty means origin-to-destination
    /// direct. Order equals traversal order of the approved path.
    pub waypoints: Vec<LatLon>,
    /// Travel mode.
    pub mode: TravelMode,
    /// Must stay `false`: letting the provider reorder waypoints would
    /// disconnect its instructions from the backend's chosen route.
    pub optimize_waypoints: bool,
}

/// One turn instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Human-phrased instruction, e.g. "Turn left onto Rue Sainte-Catherine".
    pub instruction: String,
    /// Human-readable step distance.
    pub distance_label: String,
    /// Human-readable step duration.
    pub duration_label: String,
}

/// Detailed directions returned by a provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailedDirections {
    /// Ordered turn instructions.
    pub steps: Vec<Step>,
    /// The provider's rendering of the route geometry. Supersedes the raw
    /// overlay visually for the selected candidate.
    pub path: Vec<LatLon>,
}

/// Directions capability: compute detailed steps along given waypoints.
pub trait DirectionsProvider: Send + Sync {
    /// Compute a detailed route. Fails with
    /// [`RouteError::DirectionsUnavailable`] on any provider error.
    fn route(
        &self,
        request: &DirectionsRequest,
    ) -> impl std::future::Future<Output = Result<DetailedDirections, RouteError>> + Send;
}

/// Assemble the directions request for a candidate's reconstruction.
///
/// Origin and destination come from the resolved places, not from the
/// path endpoints; the path contributes only the sampled interior
/// waypoints. Fails fast with [`RouteError::MissingSelection`] when
/// either place lacks a coordinate.
pub fn build_request(
    candidate: &RouteCandidate,
    origin: &Place,
    destination: &Place,
) -> Result<DirectionsRequest, RouteError> {
    let origin = origin.coordinate.ok_or(RouteError::MissingSelection)?;
    let destination = destination.coordinate.ok_or(RouteError::MissingSelection)?;

    Ok(DirectionsRequest {
        origin,
        destination,
        waypoints: sample_waypoints(&candidate.path),
        mode: TravelMode::Walking,
        optimize_waypoints: false,
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::Place;
    use crate::route::testing::candidate_with_path;
    use crate::route::Classification;

    fn place(lat: f64, lon: f64) -> Place {
        Place::resolved("p", lat, lon, "somewhere")
    }

    #[test]
    fn test_build_request_uses_place_coordinates() {
        let path: Vec<LatLon> = (0..10).map(|i| LatLon::new(i as f64, i as f64)).collect();
        let candidate = candidate_with_path("r1", Classification::Recommended, 0.9, path);
        let origin = place(45.50, -73.58);
        let destination = place(45.52, -73.57);

        let request = build_request(&candidate, &origin, &destination).unwrap();

        assert_eq!(request.origin, LatLon::new(45.50, -73.58));
        assert_eq!(request.destination, LatLon::new(45.52, -73.57));
        assert_eq!(request.mode, TravelMode::Walking);
        assert!(!request.optimize_waypoints);
    }

    #[test]
    fn test_build_request_fails_without_coordinates() {
        let candidate = candidate_with_path(
            "r1",
            Classification::Recommended,
            0.9,
            vec![LatLon::new(0.0, 0.0), LatLon::new(1.0, 1.0)],
        );
        let unresolved = Place::new("p", None, "typed but not picked");

        let err = build_request(&candidate, &unresolved, &place(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, RouteError::MissingSelection));
    }
}
