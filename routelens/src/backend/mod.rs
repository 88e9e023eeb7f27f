//! Route backend transport.
//!
//! Issues comparison requests to the route-scoring backend and returns a
//! normalized candidate set. The backend's scoring and explanation logic
//! is consumed as an opaque payload; this module only speaks its wire
//! format.

use tracing::debug;

use crate::coord::LatLon;
use crate::error::RouteError;
use crate::http::AsyncHttpClient;
use crate::route::{RouteCandidateSet, RouteRequestBody, RouteResponseBody};

/// Route comparison capability.
pub trait RouteBackend: Send + Sync {
    /// Request ranked route candidates for an origin/destination pair.
    fn find_routes(
        &self,
        start: LatLon,
        end: LatLon,
    ) -> impl std::future::Future<Output = Result<RouteCandidateSet, RouteError>> + Send;
}

/// HTTP implementation of [`RouteBackend`] against `POST {base_url}/route`.
pub struct HttpRouteBackend<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> HttpRouteBackend<C> {
    /// Create a backend client.
    ///
    /// `base_url` carries no trailing slash, e.g. `http://localhost:8000`.
    pub fn new(http_client: C, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http_client,
            base_url,
        }
    }

    fn route_url(&self) -> String {
        format!("{}/route", self.base_url)
    }
}

impl<C: AsyncHttpClient> RouteBackend for HttpRouteBackend<C> {
    async fn find_routes(
        &self,
        start: LatLon,
        end: LatLon,
    ) -> Result<RouteCandidateSet, RouteError> {
        let body = serde_json::to_value(RouteRequestBody::new(start, end))
            .map_err(|e| RouteError::Http(e.to_string()))?;

        debug!(%start, %end, "Requesting route candidates");
        let response = self.http_client.post_json(&self.route_url(), &body).await?;

        if !response.is_success() {
            // Error bodies surface verbatim to the user
            return Err(RouteError::Backend {
                status: response.status,
                body: response.body_text(),
            });
        }

        let parsed: RouteResponseBody = serde_json::from_slice(&response.body)
            .map_err(|e| RouteError::ResponseParse(e.to_string()))?;
        parsed.normalize()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;

    /// Scripted backend with optional artificial latency, for staleness
    /// tests.
    pub struct MockRouteBackend {
        pub response: Result<RouteCandidateSet, RouteError>,
        pub delay: Option<Duration>,
        pub calls: Mutex<usize>,
    }

    impl MockRouteBackend {
        pub fn returning(response: Result<RouteCandidateSet, RouteError>) -> Self {
            Self {
                response,
                delay: None,
                calls: Mutex::new(0),
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn call_count(&self) -> usize {
            *self.calls.lock()
        }
    }

    impl RouteBackend for MockRouteBackend {
        async fn find_routes(
            &self,
            _start: LatLon,
            _end: LatLon,
        ) -> Result<RouteCandidateSet, RouteError> {
            *self.calls.lock() += 1;
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response.clone()
        }
    }
}
