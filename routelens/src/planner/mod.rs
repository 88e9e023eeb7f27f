//! Route request coordination.
//!
//! [`RoutePlanner`] is the single coordination point between the place
//! selector, the route backend, the overlay renderer, the selection
//! state machine and the directions provider. It is passed explicitly to
//! whoever needs it; there are no ambient globals. The planner mutates
//! shared state, renderers only read it.
//!
//! # Staleness
//!
//! Result application is last-request-wins. Every `find_route` call
//! bumps a request generation before suspending; when the backend
//! answers, the result is applied only if no newer request has started
//! in the meantime. A superseded resolution, success or failure, is
//! discarded entirely: no overlay render, no selection change, no error
//! surfaced.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::backend::RouteBackend;
use crate::config::PlannerConfig;
use crate::directions::{build_request, DetailedDirections, DirectionsProvider};
use crate::error::RouteError;
use crate::map::MapSurface;
use crate::overlay::OverlayRenderer;
use crate::place::Place;
use crate::route::RouteCandidateSet;
use crate::selection::SelectionState;

/// How a `find_route` invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result was applied: overlays rendered, selection updated.
    Applied,
    /// A newer request superseded this one; its result was discarded.
    Superseded,
}

/// How a `select_candidate` invocation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Directions were fetched and applied to the current set.
    Applied(DetailedDirections),
    /// A newer fetch replaced the candidate set while the directions
    /// request was in flight; the steps were discarded.
    Superseded,
}

/// State owned by the planner and read by renderers.
struct PlannerState {
    renderer: OverlayRenderer,
    selection: SelectionState,
    current: Option<RouteCandidateSet>,
    origin: Option<Place>,
    destination: Option<Place>,
    directions: Option<DetailedDirections>,
}

/// Coordinates route comparison requests against staleness and drives
/// the overlay renderer and selection state machine.
pub struct RoutePlanner<B, D> {
    backend: B,
    directions_provider: D,
    state: Mutex<PlannerState>,
    generation: AtomicU64,
}

impl<B, D> RoutePlanner<B, D>
where
    B: RouteBackend,
    D: DirectionsProvider,
{
    /// Create a planner drawing onto the given surface.
    ///
    /// Positions the viewport at the configured default center, matching
    /// the map's initial state before any route exists.
    pub fn new(
        backend: B,
        directions_provider: D,
        surface: Arc<dyn MapSurface>,
        config: &PlannerConfig,
    ) -> Self {
        surface.pan_zoom(config.default_center, config.default_zoom);
        Self {
            backend,
            directions_provider,
            state: Mutex::new(PlannerState {
                renderer: OverlayRenderer::new(surface),
                selection: SelectionState::None,
                current: None,
                origin: None,
                destination: None,
                directions: None,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Request route candidates for an origin/destination pair.
    ///
    /// Fails fast with [`RouteError::MissingSelection`] when either
    /// place lacks a resolved coordinate; no state is touched and no
    /// network call is made. Otherwise clears all rendered state, issues
    /// exactly one backend request and, unless superseded, renders the
    /// candidate set and adopts the backend's pick.
    pub async fn find_route(
        &self,
        origin: &Place,
        destination: &Place,
    ) -> Result<FetchOutcome, RouteError> {
        let start = origin.coordinate.ok_or(RouteError::MissingSelection)?;
        let end = destination.coordinate.ok_or(RouteError::MissingSelection)?;

        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock();
            state.renderer.clear();
            state.selection.reset();
            state.current = None;
            state.directions = None;
            state.origin = Some(origin.clone());
            state.destination = Some(destination.clone());
        }
        info!(origin = %origin, destination = %destination, "Finding routes");

        let result = self.backend.find_routes(start, end).await;

        // Staleness is decided under the state lock: a newer request
        // bumps the generation before it mutates, so checking outside
        // the lock could let a stale render slip in between the check
        // and the mutation.
        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != token {
            debug!(token, "Discarding superseded route response");
            return Ok(FetchOutcome::Superseded);
        }

        let set = result?;
        state.renderer.render(&set);
        match set.chosen() {
            Ok(chosen) => state.selection.backend_chosen(chosen.id.clone()),
            Err(err) => {
                // Malformed pick: render stands, nothing is emphasized
                warn!(%err, "Backend pick unusable");
                state.selection.reset();
            }
        }
        let selection = state.selection.clone();
        state.renderer.restyle(&selection);
        info!(
            candidates = set.len(),
            selection = %selection,
            "Route candidates rendered"
        );
        state.current = Some(set);
        Ok(FetchOutcome::Applied)
    }

    /// Pick a candidate and fetch its detailed turn-by-turn steps.
    ///
    /// The selection transition happens immediately and is not rolled
    /// back: if the directions provider fails, the pick stands, the
    /// overlays stay as rendered and only a directions-specific error is
    /// returned. On success the selected overlay's geometry is replaced
    /// with the provider's rendering; all other overlays remain visible
    /// and de-emphasized.
    ///
    /// When a newer `find_route` replaces the candidate set before the
    /// directions arrive, the steps belong to nothing on screen and are
    /// reported as [`SelectionOutcome::Superseded`] rather than handed
    /// to the caller.
    pub async fn select_candidate(&self, id: &str) -> Result<SelectionOutcome, RouteError> {
        let token = self.generation.load(Ordering::SeqCst);
        let (candidate, origin, destination) = {
            let mut state = self.state.lock();
            let set = state
                .current
                .as_ref()
                .ok_or(RouteError::MissingSelection)?;
            let candidate = set
                .candidate(id)
                .ok_or_else(|| RouteError::MalformedCandidateSet(id.to_string()))?
                .clone();
            let origin = state.origin.clone().ok_or(RouteError::MissingSelection)?;
            let destination = state
                .destination
                .clone()
                .ok_or(RouteError::MissingSelection)?;

            // The pick is synchronous; steps arrive later or not at all
            state.selection.user_selected(id);
            let selection = state.selection.clone();
            state.renderer.restyle(&selection);
            (candidate, origin, destination)
        };
        info!(candidate = id, "Candidate selected");

        let request = build_request(&candidate, &origin, &destination)?;
        debug!(waypoints = request.waypoints.len(), "Reconstructing directions");
        let directions = self.directions_provider.route(&request).await?;

        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != token {
            // A newer find_route already cleared this set
            debug!("Discarding directions for superseded candidate set");
            return Ok(SelectionOutcome::Superseded);
        }
        state.renderer.replace_path(&candidate.id, &directions.path);
        state.directions = Some(directions.clone());
        info!(steps = directions.steps.len(), "Directions ready");
        Ok(SelectionOutcome::Applied(directions))
    }

    /// The most recent applied candidate set, if any.
    pub fn current_set(&self) -> Option<RouteCandidateSet> {
        self.state.lock().current.clone()
    }

    /// Current selection state.
    pub fn selection(&self) -> SelectionState {
        self.state.lock().selection.clone()
    }

    /// Turn-by-turn steps for the current selection, if fetched.
    pub fn directions(&self) -> Option<DetailedDirections> {
        self.state.lock().directions.clone()
    }

    /// Number of live overlays on the surface.
    pub fn overlay_count(&self) -> usize {
        self.state.lock().renderer.overlay_count()
    }
}
