//! Map rendering capability abstraction.
//!
//! The core never talks to a concrete map widget. It drives a
//! [`MapSurface`] trait object, which keeps the overlay and tracking
//! logic testable and lets embedders plug in whatever rendering surface
//! they have (a browser map, a GL view, or nothing at all).
//!
//! # Ownership
//!
//! The surface is shared between the overlay renderer and the live
//! position tracker. Each owns the drawable ids it created and must never
//! remove a drawable created by the other; the surface itself does not
//! police this.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::coord::{GeoBounds, LatLon};

/// Handle to a drawn path overlay. Owned by whoever created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// Handle to a point marker. Owned by whoever created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Visual styling for a path overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Stroke color as a CSS hex string.
    pub color: &'static str,
    /// Stroke weight in pixels.
    pub weight: u32,
    /// Stroke opacity, 0.0 to 1.0.
    pub opacity: f64,
    /// Stacking order; higher draws on top.
    pub z_index: i32,
}

/// Drawing operations the core requires from a map widget.
///
/// Implementations use interior mutability; the surface is shared as
/// `Arc<dyn MapSurface>` across renderers. All methods are synchronous:
/// map mutations happen on the event thread, only network I/O suspends.
pub trait MapSurface: Send + Sync {
    /// Draw a path overlay and return its handle.
    fn add_path(&self, path: &[LatLon], style: OverlayStyle) -> OverlayId;

    /// Replace the geometry of an existing overlay.
    fn set_path(&self, id: OverlayId, path: &[LatLon]);

    /// Restyle an existing overlay.
    fn set_style(&self, id: OverlayId, style: OverlayStyle);

    /// Remove a path overlay.
    fn remove_overlay(&self, id: OverlayId);

    /// Adjust the viewport to contain the given region.
    fn fit_bounds(&self, bounds: GeoBounds);

    /// Place a point marker and return its handle.
    fn add_marker(&self, at: LatLon) -> MarkerId;

    /// Move an existing marker.
    fn move_marker(&self, id: MarkerId, at: LatLon);

    /// Remove a marker.
    fn remove_marker(&self, id: MarkerId);

    /// Center the viewport on a point at the given zoom level.
    fn pan_zoom(&self, center: LatLon, zoom: u8);
}

/// A surface that draws nothing but hands out valid handles.
///
/// Used by the CLI and by embedders that want the planning logic without
/// a rendering target.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_id: AtomicU64,
}

impl HeadlessSurface {
    /// Create a new headless surface.
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl MapSurface for HeadlessSurface {
    fn add_path(&self, _path: &[LatLon], _style: OverlayStyle) -> OverlayId {
        OverlayId(self.next())
    }

    fn set_path(&self, _id: OverlayId, _path: &[LatLon]) {}

    fn set_style(&self, _id: OverlayId, _style: OverlayStyle) {}

    fn remove_overlay(&self, _id: OverlayId) {}

    fn fit_bounds(&self, _bounds: GeoBounds) {}

    fn add_marker(&self, _at: LatLon) -> MarkerId {
        MarkerId(self.next())
    }

    fn move_marker(&self, _id: MarkerId, _at: LatLon) {}

    fn remove_marker(&self, _id: MarkerId) {}

    fn pan_zoom(&self, _center: LatLon, _zoom: u8) {}
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingSurface, SurfaceEvent};
    use super::*;

    #[test]
    fn test_headless_surface_hands_out_distinct_ids() {
        let surface = HeadlessSurface::new();
        let a = surface.add_path(&[], style());
        let b = surface.add_path(&[], style());
        assert_ne!(a, b);
    }

    #[test]
    fn test_recording_surface_tracks_live_overlays() {
        let surface = RecordingSurface::new();
        let a = surface.add_path(&[LatLon::new(0.0, 0.0)], style());
        let b = surface.add_path(&[LatLon::new(1.0, 1.0)], style());
        assert_eq!(surface.live_overlay_count(), 2);

        surface.remove_overlay(a);
        assert_eq!(surface.live_overlay_count(), 1);
        assert!(surface.live_overlays().contains_key(&b));
    }

    #[test]
    fn test_recording_surface_preserves_call_order() {
        let surface = RecordingSurface::new();
        let id = surface.add_path(&[], style());
        surface.remove_overlay(id);

        let events = surface.events();
        assert!(matches!(events[0], SurfaceEvent::AddPath(..)));
        assert!(matches!(events[1], SurfaceEvent::RemoveOverlay(..)));
    }

    fn style() -> OverlayStyle {
        OverlayStyle {
            color: "#00FF00",
            weight: 3,
            opacity: 0.8,
            z_index: 1,
        }
    }
}
