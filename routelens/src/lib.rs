//! RouteLens - Route candidate comparison for walking trips
//!
//! This library coordinates a map view showing ranked walking-route
//! candidates from a scoring backend: it fetches candidate sets, renders
//! them as styled overlays, tracks which candidate is selected, rebuilds
//! turn-by-turn directions for a pick through a bounded waypoint sample,
//! and follows the device position on the map.
//!
//! # Architecture
//!
//! ```text
//! PlaceSelector ──► RoutePlanner ──► RouteBackend (POST /route)
//!                        │
//!                        ├──► OverlayRenderer ──► MapSurface
//!                        ├──► SelectionState
//!                        └──► DirectionsProvider (waypoint sampling)
//!
//! PositioningSource ──► PositionTracker ──► MapSurface
//! ```
//!
//! The planner owns all mutable route state; map rendering goes through
//! the [`map::MapSurface`] trait so the core stays independent of any
//! concrete map widget.

pub mod backend;
pub mod config;
pub mod coord;
pub mod directions;
pub mod error;
pub mod http;
pub mod logging;
pub mod map;
pub mod overlay;
pub mod place;
pub mod planner;
pub mod route;
pub mod selection;
pub mod tracker;

pub use config::PlannerConfig;
pub use coord::{GeoBounds, LatLon};
pub use error::RouteError;
pub use place::Place;
pub use planner::{FetchOutcome, RoutePlanner, SelectionOutcome};
pub use route::{Classification, RouteCandidate, RouteCandidateSet};
pub use selection::SelectionState;
