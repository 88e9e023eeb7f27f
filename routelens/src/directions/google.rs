//! Google Directions API provider.
//!
//! Obtains walking turn-by-turn steps from the Google Maps Platform
//! Directions API. Requires an API key with the Directions API enabled.
//!
//! # Waypoint Handling
//!
//! Sampled waypoints are sent with the `via:` prefix so they shape the
//! route without becoming stopovers, and the request never carries the
//! `optimize:true` directive: reordering is disabled by construction,
//! matching [`DirectionsRequest::optimize_waypoints`].

use serde::Deserialize;
use tracing::{debug, warn};

use super::{DetailedDirections, DirectionsProvider, DirectionsRequest, Step};
use crate::coord::LatLon;
use crate::error::RouteError;
use crate::http::AsyncHttpClient;

/// Base URL of the Directions API endpoint.
const DIRECTIONS_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Google Directions API provider.
///
/// # Example
///
/// ```ignore
/// use routelens::directions::GoogleDirectionsProvider;
/// use routelens::http::ReqwestClient;
///
/// let client = ReqwestClient::new()?;
/// let provider = GoogleDirectionsProvider::new(client, "YOUR_API_KEY".to_string());
/// ```
pub struct GoogleDirectionsProvider<C: AsyncHttpClient> {
    http_client: C,
    api_key: String,
}

impl<C: AsyncHttpClient> GoogleDirectionsProvider<C> {
    /// Create a provider with the given API key.
    pub fn new(http_client: C, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
        }
    }

    /// Build the request URL for the given directions request.
    fn build_url(&self, request: &DirectionsRequest) -> String {
        let mut url = format!(
            "{}?origin={},{}&destination={},{}&mode={}&key={}",
            DIRECTIONS_BASE_URL,
            request.origin.lat,
            request.origin.lon,
            request.destination.lat,
            request.destination.lon,
            request.mode,
            self.api_key
        );

        if !request.waypoints.is_empty() {
            let joined = request
                .waypoints
                .iter()
                .map(|w| format!("via:{},{}", w.lat, w.lon))
                .collect::<Vec<_>>()
                .join("|");
            url.push_str("&waypoints=");
            url.push_str(&joined);
        }

        url
    }
}

impl<C: AsyncHttpClient> DirectionsProvider for GoogleDirectionsProvider<C> {
    async fn route(&self, request: &DirectionsRequest) -> Result<DetailedDirections, RouteError> {
        let url = self.build_url(request);
        debug!(waypoints = request.waypoints.len(), "Directions request");

        let response = self
            .http_client
            .get(&url)
            .await
            .map_err(|e| RouteError::DirectionsUnavailable(e.to_string()))?;
        if !response.is_success() {
            return Err(RouteError::DirectionsUnavailable(format!(
                "HTTP {}",
                response.status
            )));
        }

        let body: DirectionsResponse = serde_json::from_slice(&response.body)
            .map_err(|e| RouteError::DirectionsUnavailable(e.to_string()))?;
        body.into_directions()
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<WireDirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct WireDirectionsRoute {
    #[serde(default)]
    legs: Vec<WireDirectionsLeg>,
    #[serde(default)]
    overview_polyline: WirePolyline,
}

#[derive(Debug, Default, Deserialize)]
struct WirePolyline {
    #[serde(default)]
    points: String,
}

#[derive(Debug, Deserialize)]
struct WireDirectionsLeg {
    #[serde(default)]
    steps: Vec<WireStep>,
}

#[derive(Debug, Deserialize)]
struct WireStep {
    #[serde(default)]
    html_instructions: String,
    #[serde(default)]
    distance: WireText,
    #[serde(default)]
    duration: WireText,
    start_location: WireLocation,
    end_location: WireLocation,
}

#[derive(Debug, Default, Deserialize)]
struct WireText {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct WireLocation {
    lat: f64,
    lng: f64,
}

impl From<WireLocation> for LatLon {
    fn from(loc: WireLocation) -> Self {
        LatLon::new(loc.lat, loc.lng)
    }
}

impl DirectionsResponse {
    fn into_directions(self) -> Result<DetailedDirections, RouteError> {
        if self.status != "OK" {
            return Err(RouteError::DirectionsUnavailable(self.status));
        }
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteError::DirectionsUnavailable("no routes returned".to_string()))?;

        let encoded = &route.overview_polyline.points;
        let overview = decode_polyline(encoded).filter(|p| p.len() >= 2);
        if overview.is_none() && !encoded.is_empty() {
            warn!("Undecodable overview polyline, using step geometry");
        }

        let mut steps = Vec::new();
        let mut chords = Vec::new();
        for leg in route.legs {
            for step in leg.steps {
                if chords.is_empty() {
                    chords.push(step.start_location.into());
                }
                chords.push(step.end_location.into());
                steps.push(Step {
                    instruction: step.html_instructions,
                    distance_label: step.distance.text,
                    duration_label: step.duration.text,
                });
            }
        }

        // The overview polyline follows the road shape; step endpoints
        // are the coarser fallback.
        let path = overview.unwrap_or(chords);
        Ok(DetailedDirections { steps, path })
    }
}

/// Decode a Google encoded polyline into geographic points.
///
/// Coordinates arrive as zigzag-encoded deltas in 1e-5 degree units,
/// packed 5 bits per character with an ASCII offset of 63. Returns `None`
/// on any malformed input rather than a truncated path.
fn decode_polyline(encoded: &str) -> Option<Vec<LatLon>> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut points = Vec::new();
    while i < bytes.len() {
        lat += decode_delta(bytes, &mut i)?;
        lon += decode_delta(bytes, &mut i)?;
        points.push(LatLon::new(lat as f64 * 1e-5, lon as f64 * 1e-5));
    }
    Some(points)
}

fn decode_delta(bytes: &[u8], i: &mut usize) -> Option<i64> {
    let mut value: i64 = 0;
    let mut shift: u32 = 0;
    loop {
        let chunk = i64::from(*bytes.get(*i)?) - 63;
        if !(0..=0x3f).contains(&chunk) || shift > 60 {
            return None;
        }
        *i += 1;
        value |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    // Zigzag: lowest bit carries the sign
    Some(if value & 1 != 0 { !(value >> 1) } else { value >> 1 })
}
