//! Route candidate data model and backend wire format.
//!
//! The backend answers a comparison request with several ranked walking
//! routes plus the id of the one it recommends taking. Types in this
//! module are immutable after normalization; ranking order from the wire
//! is preserved verbatim.
//!
//! # Wire Format
//!
//! ```text
//! POST /route  { "start": [lon, lat], "end": [lon, lat] }
//!
//! 200 OK {
//!   "routes": [
//!     { "id": "...", "type": "recommended" | "alternative", "score": 0.9,
//!       "overview_path": [{ "lat": ..., "lon": ... }, ...],
//!       "legs": [{ "distance": { "value": m, "text": "..." },
//!                  "duration": { "value": s, "text": "..." } }] }
//!   ],
//!   "chosen_route_id": "...",
//!   "explanation": "..." | { "explanation": "..." }
//! }
//! ```

mod wire;

pub use wire::{RouteRequestBody, RouteResponseBody};

use crate::coord::LatLon;
use crate::error::RouteError;

/// Backend classification of a route candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The route class the backend scored highest for current conditions.
    Recommended,
    /// Any other proposed route.
    Alternative,
}

impl Classification {
    /// Parse the wire `type` string. Unknown values degrade to
    /// [`Classification::Alternative`] rather than failing the response.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "recommended" => Classification::Recommended,
            _ => Classification::Alternative,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Recommended => write!(f, "recommended"),
            Classification::Alternative => write!(f, "alternative"),
        }
    }
}

/// A single leg of a candidate route.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Leg length in meters.
    pub distance_meters: f64,
    /// Leg duration in seconds.
    pub duration_seconds: f64,
    /// Human-readable distance (e.g. "1.2 km").
    pub distance_label: String,
    /// Human-readable duration (e.g. "15 mins").
    pub duration_label: String,
}

/// One proposed walking route among several returned for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// Candidate id, unique within its response.
    pub id: String,
    /// Backend classification.
    pub classification: Classification,
    /// Backend score for this candidate.
    pub score: f64,
    /// Route geometry, at least two points, insertion order = traversal order.
    pub path: Vec<LatLon>,
    /// Route legs in traversal order.
    pub legs: Vec<Leg>,
}

/// A normalized backend response: ranked candidates plus the backend's pick.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidateSet {
    /// Candidates in backend ranking order, preserved from the wire.
    pub candidates: Vec<RouteCandidate>,
    /// Id of the candidate the backend recommends.
    pub chosen_id: String,
    /// Optional human-readable explanation of the backend's pick.
    pub explanation: Option<String>,
}

impl RouteCandidateSet {
    /// Look up a candidate by id.
    pub fn candidate(&self, id: &str) -> Option<&RouteCandidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// The candidate referenced by `chosen_id`.
    ///
    /// Returns [`RouteError::MalformedCandidateSet`] when `chosen_id`
    /// matches no candidate. Callers must degrade gracefully on that
    /// error: render everything, emphasize nothing.
    pub fn chosen(&self) -> Result<&RouteCandidate, RouteError> {
        self.candidate(&self.chosen_id)
            .ok_or_else(|| RouteError::MalformedCandidateSet(self.chosen_id.clone()))
    }

    /// Number of candidates in the set.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the set carries no candidates at all.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_from_wire() {
        assert_eq!(
            Classification::from_wire("recommended"),
            Classification::Recommended
        );
        assert_eq!(
            Classification::from_wire("alternative"),
            Classification::Alternative
        );
        // Unknown types should not fail the whole response
        assert_eq!(
            Classification::from_wire("scenic"),
            Classification::Alternative
        );
    }

    #[test]
    fn test_chosen_resolves_when_present() {
        let set = testing::two_candidate_set();
        let chosen = set.chosen().unwrap();
        assert_eq!(chosen.id, "route-a");
        assert_eq!(chosen.classification, Classification::Recommended);
    }

    #[test]
    fn test_chosen_errors_when_id_unknown() {
        let mut set = testing::two_candidate_set();
        set.chosen_id = "nonexistent".to_string();

        let err = set.chosen().unwrap_err();
        assert!(matches!(err, RouteError::MalformedCandidateSet(ref id) if id == "nonexistent"));
    }

    #[test]
    fn test_candidate_lookup() {
        let set = testing::two_candidate_set();
        assert!(set.candidate("route-b").is_some());
        assert!(set.candidate("route-z").is_none());
    }

    #[test]
    fn test_ranking_order_preserved() {
        let set = testing::two_candidate_set();
        assert_eq!(set.candidates[0].id, "route-a");
        assert_eq!(set.candidates[1].id, "route-b");
    }
}
