//! Serde types for the backend route endpoint.
//!
//! Wire structs are private to the crate boundary; everything downstream
//! works with the normalized [`RouteCandidateSet`].

use serde::{Deserialize, Serialize};

use super::{Classification, Leg, RouteCandidate, RouteCandidateSet};
use crate::coord::LatLon;
use crate::error::RouteError;

/// Request body for `POST /route`.
///
/// Coordinates travel as `[lon, lat]` pairs, GeoJSON-style.
#[derive(Debug, Clone, Serialize)]
pub struct RouteRequestBody {
    /// Origin as `[lon, lat]`.
    pub start: [f64; 2],
    /// Destination as `[lon, lat]`.
    pub end: [f64; 2],
}

impl RouteRequestBody {
    /// Build a request body from geographic points.
    pub fn new(start: LatLon, end: LatLon) -> Self {
        Self {
            start: [start.lon, start.lat],
            end: [end.lon, end.lat],
        }
    }
}

/// Response body for `POST /route`.
#[derive(Debug, Deserialize)]
pub struct RouteResponseBody {
    routes: Vec<WireRoute>,
    chosen_route_id: String,
    #[serde(default)]
    explanation: Option<WireExplanation>,
}

#[derive(Debug, Deserialize)]
struct WireRoute {
    id: String,
    #[serde(rename = "type")]
    route_type: String,
    score: f64,
    overview_path: Vec<WirePoint>,
    #[serde(default)]
    legs: Vec<WireLeg>,
}

#[derive(Debug, Deserialize)]
struct WirePoint {
    lat: f64,
    // Some backend revisions emit Google-style `lng` instead of `lon`.
    #[serde(alias = "lng")]
    lon: f64,
}

#[derive(Debug, Default, Deserialize)]
struct WireLeg {
    #[serde(default)]
    distance: WireQuantity,
    #[serde(default)]
    duration: WireQuantity,
}

#[derive(Debug, Default, Deserialize)]
struct WireQuantity {
    #[serde(default)]
    value: f64,
    #[serde(default)]
    text: String,
}

/// The backend emits either a bare string or `{ "explanation": "..." }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireExplanation {
    Text(String),
    Wrapped { explanation: String },
}

impl WireExplanation {
    fn into_text(self) -> String {
        match self {
            WireExplanation::Text(text) => text,
            WireExplanation::Wrapped { explanation } => explanation,
        }
    }
}

impl RouteResponseBody {
    /// Normalize the wire response into the domain model.
    ///
    /// Rejects candidates whose geometry has fewer than two points; a
    /// route that cannot be drawn is a malformed payload, not a degraded
    /// one. `chosen_route_id` is *not* validated here: a dangling id is a
    /// rendering-degradation concern handled by the consumer, per the
    /// candidate set invariant.
    pub fn normalize(self) -> Result<RouteCandidateSet, RouteError> {
        let mut candidates = Vec::with_capacity(self.routes.len());
        for route in self.routes {
            if route.overview_path.len() < 2 {
                return Err(RouteError::ResponseParse(format!(
                    "route {} has {} path points, need at least 2",
                    route.id,
                    route.overview_path.len()
                )));
            }
            candidates.push(RouteCandidate {
                classification: Classification::from_wire(&route.route_type),
                score: route.score,
                path: route
                    .overview_path
                    .into_iter()
                    .map(|p| LatLon::new(p.lat, p.lon))
                    .collect(),
                legs: route
                    .legs
                    .into_iter()
                    .map(|leg| Leg {
                        distance_meters: leg.distance.value,
                        duration_seconds: leg.duration.value,
                        distance_label: leg.distance.text,
                        duration_label: leg.duration.text,
                    })
                    .collect(),
                id: route.id,
            });
        }

        Ok(RouteCandidateSet {
            candidates,
            chosen_id: self.chosen_route_id,
            explanation: self.explanation.map(WireExplanation::into_text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROUTE_RESPONSE: &str = r#"{
        "routes": [
            {
                "id": "r1",
                "type": "recommended",
                "score": 0.9,
                "overview_path": [
                    {"lat": 45.50, "lon": -73.58},
                    {"lat": 45.51, "lon": -73.575},
                    {"lat": 45.52, "lon": -73.57}
                ],
                "legs": [{
                    "distance": {"value": 2300.0, "text": "2.3 km"},
                    "duration": {"value": 1680.0, "text": "28 mins"}
                }]
            },
            {
                "id": "r2",
                "type": "alternative",
                "score": 0.6,
                "overview_path": [
                    {"lat": 45.50, "lng": -73.58},
                    {"lat": 45.52, "lng": -73.57}
                ],
                "legs": []
            }
        ],
        "chosen_route_id": "r1",
        "explanation": "Sidewalks cleared on the recommended route"
    }"#;

    #[test]
    fn test_request_body_is_lon_lat_ordered() {
        let body = RouteRequestBody::new(LatLon::new(45.50, -73.58), LatLon::new(45.52, -73.57));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["start"][0], -73.58);
        assert_eq!(json["start"][1], 45.50);
        assert_eq!(json["end"][0], -73.57);
        assert_eq!(json["end"][1], 45.52);
    }

    #[test]
    fn test_normalize_two_route_response() {
        let body: RouteResponseBody = serde_json::from_str(TWO_ROUTE_RESPONSE).unwrap();
        let set = body.normalize().unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.chosen_id, "r1");
        assert_eq!(
            set.explanation.as_deref(),
            Some("Sidewalks cleared on the recommended route")
        );

        let first = &set.candidates[0];
        assert_eq!(first.classification, Classification::Recommended);
        assert_eq!(first.path.len(), 3);
        assert_eq!(first.legs[0].distance_label, "2.3 km");
        assert_eq!(first.legs[0].duration_seconds, 1680.0);
    }

    #[test]
    fn test_lng_alias_accepted() {
        let body: RouteResponseBody = serde_json::from_str(TWO_ROUTE_RESPONSE).unwrap();
        let set = body.normalize().unwrap();
        // Second route used "lng" keys
        assert_eq!(set.candidates[1].path[0].lon, -73.58);
    }

    #[test]
    fn test_wrapped_explanation_accepted() {
        let json = r#"{
            "routes": [{
                "id": "r1", "type": "recommended", "score": 1.0,
                "overview_path": [{"lat": 0.0, "lon": 0.0}, {"lat": 1.0, "lon": 1.0}]
            }],
            "chosen_route_id": "r1",
            "explanation": {"explanation": "wind-sheltered"}
        }"#;
        let body: RouteResponseBody = serde_json::from_str(json).unwrap();
        let set = body.normalize().unwrap();
        assert_eq!(set.explanation.as_deref(), Some("wind-sheltered"));
    }

    #[test]
    fn test_missing_explanation_is_none() {
        let json = r#"{
            "routes": [{
                "id": "r1", "type": "alternative", "score": 0.5,
                "overview_path": [{"lat": 0.0, "lon": 0.0}, {"lat": 1.0, "lon": 1.0}]
            }],
            "chosen_route_id": "r1"
        }"#;
        let body: RouteResponseBody = serde_json::from_str(json).unwrap();
        assert!(body.normalize().unwrap().explanation.is_none());
    }

    #[test]
    fn test_single_point_path_rejected() {
        let json = r#"{
            "routes": [{
                "id": "tiny", "type": "recommended", "score": 1.0,
                "overview_path": [{"lat": 45.5, "lon": -73.6}]
            }],
            "chosen_route_id": "tiny"
        }"#;
        let body: RouteResponseBody = serde_json::from_str(json).unwrap();
        let err = body.normalize().unwrap_err();
        assert!(matches!(err, RouteError::ResponseParse(_)));
    }

    #[test]
    fn test_dangling_chosen_id_still_normalizes() {
        let json = r#"{
            "routes": [{
                "id": "r1", "type": "recommended", "score": 1.0,
                "overview_path": [{"lat": 0.0, "lon": 0.0}, {"lat": 1.0, "lon": 1.0}]
            }],
            "chosen_route_id": "nonexistent"
        }"#;
        let body: RouteResponseBody = serde_json::from_str(json).unwrap();
        let set = body.normalize().unwrap();
        assert!(set.chosen().is_err());
    }
}
