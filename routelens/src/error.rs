//! Crate-wide error taxonomy.
//!
//! Every failure surfaced to the user maps onto one of these variants.
//! Errors are terminal for the operation that produced them only; they
//! never corrupt previously rendered state. Superseded (stale) request
//! results are the single case that is deliberately discarded without
//! surfacing anything.

use thiserror::Error;

/// Errors produced by the route planning core.
#[derive(Debug, Clone, Error)]
pub enum RouteError {
    /// Origin or destination has no resolved coordinate yet. The user
    /// must pick an entry from the suggestion dropdown first.
    #[error("Please select origin and destination from the suggestions")]
    MissingSelection,

    /// The route backend answered with a non-success status. The body is
    /// surfaced verbatim alongside the status code.
    #[error("Backend error: {status} - {body}")]
    Backend {
        /// HTTP status code of the failed response.
        status: u16,
        /// Error body returned by the backend.
        body: String,
    },

    /// The route backend answered 2xx but the payload did not parse.
    #[error("Could not read route response: {0}")]
    ResponseParse(String),

    /// A referenced id matched no candidate in the current set. For a
    /// backend-chosen id the set still renders, with no overlay
    /// emphasized.
    #[error("Route {0} not present in candidates")]
    MalformedCandidateSet(String),

    /// The directions provider failed. Secondary feature failure: the
    /// user's selection and the rendered overlays remain valid.
    #[error("Could not get directions for this route: {0}")]
    DirectionsUnavailable(String),

    /// The platform exposes no positioning capability.
    #[error("Position tracking is not supported on this device")]
    PositioningUnsupported,

    /// The user denied the positioning permission.
    #[error("Permission to access the device position was denied")]
    PositioningDenied,

    /// No position fix arrived within the allowed time.
    #[error("Timed out waiting for a position fix")]
    PositioningTimeout,

    /// Transport-level failure before any HTTP status was received.
    #[error("Request failed: {0}")]
    Http(String),

    /// Configuration file or value problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_carries_status_and_body() {
        let err = RouteError::Backend {
            status: 502,
            body: "upstream routing engine unavailable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream routing engine unavailable"));
    }

    #[test]
    fn test_missing_selection_is_user_actionable() {
        let msg = RouteError::MissingSelection.to_string();
        assert!(msg.contains("suggestions"));
    }

    #[test]
    fn test_malformed_set_names_the_missing_id() {
        let err = RouteError::MalformedCandidateSet("nonexistent".to_string());
        assert!(err.to_string().contains("nonexistent"));
    }
}
