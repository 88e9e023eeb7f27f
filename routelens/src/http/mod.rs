//! HTTP client abstraction for testability.
//!
//! Both the route backend and the directions provider talk HTTP. The
//! trait keeps them mockable; status interpretation stays with the
//! caller, since a non-2xx means different things to each (verbatim
//! backend error vs. a degraded directions feature).

use crate::error::RouteError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An HTTP response: status code plus raw body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, lossy.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for async HTTP operations.
///
/// Allows dependency injection of mock clients in tests. Transport-level
/// failures (DNS, connect, timeout) map to [`RouteError::Http`]; any
/// received response, success or not, is returned for the caller to
/// interpret.
pub trait AsyncHttpClient: Send + Sync {
    /// Perform a GET request.
    fn get(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<HttpResponse, RouteError>> + Send;

    /// Perform a POST request with a JSON body.
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<HttpResponse, RouteError>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client with the default timeout.
    pub fn new() -> Result<Self, RouteError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, RouteError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RouteError::Http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, RouteError> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| RouteError::Http(format!("Failed to read response: {}", e)))?
            .to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, RouteError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RouteError::Http(format!("Request failed: {}", e)))?;
        Self::read(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, RouteError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| RouteError::Http(format!("Request failed: {}", e)))?;
        Self::read(response).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;

    /// Mock HTTP client returning a scripted response and recording the
    /// URLs and bodies it was asked for.
    pub struct MockHttpClient {
        pub response: Result<HttpResponse, RouteError>,
        pub requests: Mutex<Vec<(String, Option<serde_json::Value>)>>,
    }

    impl MockHttpClient {
        pub fn with_json(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.as_bytes().to_vec(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                response: Err(RouteError::Http(message.to_string())),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().iter().map(|(u, _)| u.clone()).collect()
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, RouteError> {
            self.requests.lock().push((url.to_string(), None));
            self.response.clone()
        }

        async fn post_json(
            &self,
            url: &str,
            body: &serde_json::Value,
        ) -> Result<HttpResponse, RouteError> {
            self.requests
                .lock()
                .push((url.to_string(), Some(body.clone())));
            self.response.clone()
        }
    }
}
