//! Live position tracking.
//!
//! Independent of route comparison: acquires device position fixes from a
//! positioning capability, renders a marker on the shared map surface and
//! keeps it updated. The tracker owns its marker exclusively; it never
//! touches overlays owned by the route renderer.
//!
//! # Lifecycle
//!
//! ```text
//! Stopped ──start──► Starting ──first fix──► Active ──stop/teardown──► Stopped
//!     ▲                  │
//!     └── unsupported ───┘   (no side effects)
//! ```
//!
//! The first fix creates the marker and centers the map once; subsequent
//! fixes move the marker only. Stop cancels the continuous watch, removes
//! the marker and is idempotent. At most one watch/marker pair exists at
//! a time.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::coord::LatLon;
use crate::error::RouteError;
use crate::map::{MapSurface, MarkerId};

/// Zoom level applied when centering on the first fix.
pub const TRACKING_ZOOM: u8 = 16;

/// A single position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    /// Position of the device.
    pub position: LatLon,
}

impl Fix {
    /// Create a fix at the given coordinates.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            position: LatLon::new(lat, lon),
        }
    }
}

/// Cancellable subscription to a continuous fix watch.
///
/// Cancelling guarantees no further fixes are applied, even if the
/// source still has some in flight.
#[derive(Debug, Clone)]
pub struct WatchHandle {
    token: CancellationToken,
}

impl WatchHandle {
    /// Create a handle around a cancellation token.
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Token sources can watch to stop producing fixes.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancel the watch. Safe to call more than once.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the watch has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Positioning capability: one-shot fixes and continuous watches.
pub trait PositioningSource: Send + Sync {
    /// Obtain a single fix.
    fn current_fix(
        &self,
    ) -> impl std::future::Future<Output = Result<Fix, RouteError>> + Send;

    /// Start a continuous watch, pushing fixes into the sink until the
    /// returned handle is cancelled.
    ///
    /// Fails with [`RouteError::PositioningUnsupported`] when the
    /// platform has no positioning capability, or
    /// [`RouteError::PositioningDenied`] when permission was refused.
    fn watch(&self, sink: mpsc::UnboundedSender<Fix>) -> Result<WatchHandle, RouteError>;
}

/// Source that replays a fixed list of fixes, for embedders without a
/// live platform capability and for tests.
#[derive(Debug, Clone)]
pub struct ReplayPositioningSource {
    fixes: Vec<Fix>,
}

impl ReplayPositioningSource {
    /// Create a source replaying the given fixes in order.
    pub fn new(fixes: Vec<Fix>) -> Self {
        Self { fixes }
    }
}

impl PositioningSource for ReplayPositioningSource {
    async fn current_fix(&self) -> Result<Fix, RouteError> {
        self.fixes
            .first()
            .copied()
            .ok_or(RouteError::PositioningTimeout)
    }

    fn watch(&self, sink: mpsc::UnboundedSender<Fix>) -> Result<WatchHandle, RouteError> {
        for fix in &self.fixes {
            let _ = sink.send(*fix);
        }
        Ok(WatchHandle::new(CancellationToken::new()))
    }
}

/// Tracker lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerPhase {
    /// No watch, no marker.
    #[default]
    Stopped,
    /// Watch running, waiting for the first fix.
    Starting,
    /// Marker placed, following fixes.
    Active,
}

/// Renders and updates a live position marker from a fix watch.
pub struct PositionTracker<S: PositioningSource> {
    source: S,
    surface: Arc<dyn MapSurface>,
    phase: TrackerPhase,
    watch: Option<WatchHandle>,
    marker: Option<MarkerId>,
    fixes: Option<mpsc::UnboundedReceiver<Fix>>,
}

impl<S: PositioningSource> PositionTracker<S> {
    /// Create a tracker drawing onto the given surface.
    pub fn new(source: S, surface: Arc<dyn MapSurface>) -> Self {
        Self {
            source,
            surface,
            phase: TrackerPhase::Stopped,
            watch: None,
            marker: None,
            fixes: None,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// Start tracking.
    ///
    /// A no-op when a session is already running. On an unsupported or
    /// denied platform the error propagates and the tracker remains
    /// `Stopped` with no side effects.
    pub fn start(&mut self) -> Result<(), RouteError> {
        if self.phase != TrackerPhase::Stopped {
            debug!(phase = ?self.phase, "Tracking already running");
            return Ok(());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let watch = self.source.watch(tx)?;
        self.watch = Some(watch);
        self.fixes = Some(rx);
        self.phase = TrackerPhase::Starting;
        info!("Position tracking started");
        Ok(())
    }

    /// Consume fixes until the watch is cancelled or the source ends.
    ///
    /// Returns immediately when no session is running. After
    /// cancellation no further fix is applied.
    pub async fn run(&mut self) {
        let Some(mut rx) = self.fixes.take() else {
            return;
        };
        let Some(token) = self.watch.as_ref().map(|w| w.token()) else {
            return;
        };

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                maybe_fix = rx.recv() => match maybe_fix {
                    Some(fix) => self.apply_fix(fix),
                    None => break,
                },
            }
        }
    }

    /// Apply one fix: first fix places the marker and centers the map
    /// once, later fixes only move the marker.
    pub fn apply_fix(&mut self, fix: Fix) {
        match self.phase {
            TrackerPhase::Stopped => {
                // Fix raced a stop; the watch is already cancelled.
            }
            TrackerPhase::Starting => {
                let marker = self.surface.add_marker(fix.position);
                self.surface.pan_zoom(fix.position, TRACKING_ZOOM);
                self.marker = Some(marker);
                self.phase = TrackerPhase::Active;
                info!(position = %fix.position, "First position fix");
            }
            TrackerPhase::Active => {
                if let Some(marker) = self.marker {
                    self.surface.move_marker(marker, fix.position);
                }
            }
        }
    }

    /// Stop tracking: cancel the watch and remove the marker.
    ///
    /// Idempotent; stopping a stopped tracker does nothing.
    pub fn stop(&mut self) {
        if let Some(watch) = self.watch.take() {
            watch.cancel();
        }
        if let Some(marker) = self.marker.take() {
            self.surface.remove_marker(marker);
        }
        self.fixes = None;
        if self.phase != TrackerPhase::Stopped {
            self.phase = TrackerPhase::Stopped;
            info!("Position tracking stopped");
        }
    }
}

impl<S: PositioningSource> Drop for PositionTracker<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
