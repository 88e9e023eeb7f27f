//! Overlay renderer: one drawn path per route candidate.
//!
//! The renderer owns exactly one overlay handle per candidate of the most
//! recent set, keyed by candidate id. Handles are destroyed and recreated
//! on every render; a handle from a previous request must never remain
//! attached to the surface.
//!
//! # Styling
//!
//! Color follows classification, emphasis follows selection:
//! - recommended routes draw in the high-contrast positive color,
//!   alternatives in the neutral accent color;
//! - the overlay matching the current selection (falling back to the
//!   backend's pick when nothing is selected) draws thick and opaque,
//!   everything else thin and translucent.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::coord::{GeoBounds, LatLon};
use crate::map::{MapSurface, OverlayId, OverlayStyle};
use crate::route::{Classification, RouteCandidateSet};
use crate::selection::SelectionState;

/// Stroke color for recommended candidates.
pub const RECOMMENDED_COLOR: &str = "#00FF00";

/// Stroke color for alternative candidates.
pub const ALTERNATIVE_COLOR: &str = "#0066FF";

/// Stroke weight for the emphasized overlay.
const EMPHASIZED_WEIGHT: u32 = 6;

/// Stroke weight for de-emphasized overlays.
const DEEMPHASIZED_WEIGHT: u32 = 3;

/// One candidate's drawn overlay.
#[derive(Debug)]
struct CandidateOverlay {
    candidate_id: String,
    classification: Classification,
    overlay: OverlayId,
}

/// Renders route candidate sets onto a map surface.
///
/// The renderer reads selection state, it never mutates it. Overlay
/// handles created here are owned exclusively by the renderer; the live
/// position tracker owns its marker independently on the same surface.
pub struct OverlayRenderer {
    surface: Arc<dyn MapSurface>,
    overlays: Vec<CandidateOverlay>,
    chosen_id: Option<String>,
}

impl OverlayRenderer {
    /// Create a renderer drawing onto the given surface.
    pub fn new(surface: Arc<dyn MapSurface>) -> Self {
        Self {
            surface,
            overlays: Vec::new(),
            chosen_id: None,
        }
    }

    /// Number of live overlays. Always equals the candidate count of the
    /// most recently rendered set.
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Remove every overlay from the surface.
    pub fn clear(&mut self) {
        for entry in self.overlays.drain(..) {
            self.surface.remove_overlay(entry.overlay);
        }
        self.chosen_id = None;
    }

    /// Draw one overlay per candidate, clear-then-draw.
    ///
    /// Every overlay from the previous render is removed before any new
    /// overlay is created, so a partially mixed overlay set is never
    /// observable. After drawing, the viewport is fitted to a region
    /// containing every point of every candidate, not just the chosen one.
    ///
    /// A `chosen_id` that references no candidate degrades to rendering
    /// with no emphasized overlay.
    pub fn render(&mut self, set: &RouteCandidateSet) {
        self.clear();

        let chosen_id = match set.chosen() {
            Ok(candidate) => Some(candidate.id.clone()),
            Err(err) => {
                warn!(chosen_id = %set.chosen_id, %err, "Rendering without emphasis");
                None
            }
        };

        for candidate in &set.candidates {
            let emphasized = chosen_id.as_deref() == Some(candidate.id.as_str());
            let style = style_for(candidate.classification, emphasized);
            let overlay = self.surface.add_path(&candidate.path, style);
            self.overlays.push(CandidateOverlay {
                candidate_id: candidate.id.clone(),
                classification: candidate.classification,
                overlay,
            });
        }
        self.chosen_id = chosen_id;

        let all_points = set.candidates.iter().flat_map(|c| c.path.iter().copied());
        if let Some(bounds) = GeoBounds::from_points(all_points) {
            self.surface.fit_bounds(bounds);
        }

        debug!(
            overlays = self.overlays.len(),
            chosen = self.chosen_id.as_deref().unwrap_or("-"),
            "Rendered candidate set"
        );
    }

    /// Re-apply emphasis styling after a selection transition.
    ///
    /// With [`SelectionState::None`] emphasis falls back to the backend's
    /// pick; if that id was malformed, nothing is emphasized.
    pub fn restyle(&mut self, selection: &SelectionState) {
        let emphasized_id = selection
            .selected_id()
            .or(self.chosen_id.as_deref())
            .map(str::to_owned);

        for entry in &self.overlays {
            let emphasized = emphasized_id.as_deref() == Some(entry.candidate_id.as_str());
            self.surface
                .set_style(entry.overlay, style_for(entry.classification, emphasized));
        }
    }

    /// Replace one candidate's drawn geometry with a provider rendering.
    ///
    /// Used after a successful directions fetch so the selected candidate
    /// shows the provider's road-snapped path while the other overlays
    /// stay as rendered. Returns false when the id is not in the current
    /// set.
    pub fn replace_path(&mut self, candidate_id: &str, path: &[LatLon]) -> bool {
        match self.overlays.iter().find(|e| e.candidate_id == candidate_id) {
            Some(entry) => {
                self.surface.set_path(entry.overlay, path);
                true
            }
            None => false,
        }
    }
}

/// Deterministic styling rule for one overlay.
fn style_for(classification: Classification, emphasized: bool) -> OverlayStyle {
    let color = match classification {
        Classification::Recommended => RECOMMENDED_COLOR,
        Classification::Alternative => ALTERNATIVE_COLOR,
    };
    if emphasized {
        OverlayStyle {
            color,
            weight: EMPHASIZED_WEIGHT,
            opacity: 1.0,
            z_index: 1000,
        }
    } else {
        OverlayStyle {
            color,
            weight: DEEMPHASIZED_WEIGHT,
            opacity: 0.5,
            z_index: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::testing::RecordingSurface;
    use crate::route::testing::two_candidate_set;

    fn renderer() -> (Arc<RecordingSurface>, OverlayRenderer) {
        let surface = Arc::new(RecordingSurface::new());
        let renderer = OverlayRenderer::new(surface.clone());
        (surface, renderer)
    }

    fn emphasized(style: &OverlayStyle) -> bool {
        style.weight == EMPHASIZED_WEIGHT
    }

    #[test]
    fn test_render_creates_one_overlay_per_candidate() {
        let (surface, mut renderer) = renderer();
        let set = two_candidate_set();

        renderer.render(&set);

        assert_eq!(renderer.overlay_count(), set.len());
        assert_eq!(surface.live_overlay_count(), set.len());
    }

    #[test]
    fn test_rerender_leaks_no_overlays() {
        let (surface, mut renderer) = renderer();
        let set = two_candidate_set();

        renderer.render(&set);
        renderer.render(&set);
        renderer.render(&set);

        assert_eq!(surface.live_overlay_count(), set.len());
    }

    #[test]
    fn test_render_emphasizes_exactly_the_chosen_candidate() {
        let (surface, mut renderer) = renderer();
        renderer.render(&two_candidate_set());

        assert_eq!(surface.count_styled(emphasized), 1);
        assert_eq!(
            surface.count_styled(|s| s.color == RECOMMENDED_COLOR && emphasized(s)),
            1
        );
    }

    #[test]
    fn test_malformed_chosen_id_renders_with_no_emphasis() {
        let (surface, mut renderer) = renderer();
        let mut set = two_candidate_set();
        set.chosen_id = "nonexistent".to_string();

        renderer.render(&set);

        assert_eq!(surface.live_overlay_count(), 2);
        assert_eq!(surface.count_styled(emphasized), 0);
    }

    #[test]
    fn test_colors_follow_classification() {
        let (surface, mut renderer) = renderer();
        renderer.render(&two_candidate_set());

        assert_eq!(surface.count_styled(|s| s.color == RECOMMENDED_COLOR), 1);
        assert_eq!(surface.count_styled(|s| s.color == ALTERNATIVE_COLOR), 1);
    }

    #[test]
    fn test_restyle_moves_emphasis_to_user_pick() {
        let (surface, mut renderer) = renderer();
        renderer.render(&two_candidate_set());

        let selection = SelectionState::UserSelected("route-b".to_string());
        renderer.restyle(&selection);

        assert_eq!(surface.count_styled(emphasized), 1);
        assert_eq!(
            surface.count_styled(|s| s.color == ALTERNATIVE_COLOR && emphasized(s)),
            1
        );
    }

    #[test]
    fn test_restyle_none_falls_back_to_backend_pick() {
        let (surface, mut renderer) = renderer();
        renderer.render(&two_candidate_set());
        renderer.restyle(&SelectionState::UserSelected("route-b".to_string()));

        renderer.restyle(&SelectionState::None);

        assert_eq!(
            surface.count_styled(|s| s.color == RECOMMENDED_COLOR && emphasized(s)),
            1
        );
    }

    #[test]
    fn test_viewport_fits_every_candidate_point() {
        let (surface, mut renderer) = renderer();
        let set = two_candidate_set();
        renderer.render(&set);

        let bounds = surface
            .events()
            .iter()
            .find_map(|e| match e {
                crate::map::testing::SurfaceEvent::FitBounds(b) => Some(*b),
                _ => None,
            })
            .expect("render should fit the viewport");

        for candidate in &set.candidates {
            for point in &candidate.path {
                assert!(bounds.contains(*point));
            }
        }
    }

    #[test]
    fn test_replace_path_targets_only_the_named_candidate() {
        let (surface, mut renderer) = renderer();
        renderer.render(&two_candidate_set());

        let replaced = renderer.replace_path("route-b", &[LatLon::new(0.0, 0.0)]);
        assert!(replaced);
        assert!(!renderer.replace_path("route-z", &[]));

        let set_paths: Vec<_> = surface
            .events()
            .iter()
            .filter(|e| matches!(e, crate::map::testing::SurfaceEvent::SetPath(..)))
            .cloned()
            .collect();
        assert_eq!(set_paths.len(), 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let (surface, mut renderer) = renderer();
        renderer.render(&two_candidate_set());
        renderer.clear();

        assert_eq!(renderer.overlay_count(), 0);
        assert_eq!(surface.live_overlay_count(), 0);
    }
}
