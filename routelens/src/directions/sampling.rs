//! Waypoint sampling: thinning a dense path to a bounded waypoint list.
//!
//! Directions providers cap the number of intermediate waypoints per
//! request. The sampler keeps every k-th interior point of the candidate
//! path, in traversal order, where the stride adapts to path density:
//! short paths sample densely to keep their shape under the provider's
//! road snapping, long paths thin aggressively to respect the cap.

use crate::coord::LatLon;

/// Maximum intermediate waypoints sent to the directions provider.
///
/// Chosen below the provider hard cap (25 for Google's Directions API)
/// with margin.
pub const MAX_WAYPOINTS: usize = 21;

/// Interior point count below which the dense stride of 2 applies.
pub const DENSE_PATH_THRESHOLD: usize = 50;

/// Sample interior waypoints from a candidate path.
///
/// The first and last points are excluded; they travel separately as the
/// request origin and destination. The returned list preserves traversal
/// order and never exceeds [`MAX_WAYPOINTS`] entries. Paths with no
/// interior points yield an empty list.
pub fn sample_waypoints(path: &[LatLon]) -> Vec<LatLon> {
    if path.len() <= 2 {
        return Vec::new();
    }

    let interior_len = path.len() - 2;
    let stride = if interior_len < DENSE_PATH_THRESHOLD {
        2
    } else {
        (interior_len / MAX_WAYPOINTS).max(2)
    };

    path.iter()
        .enumerate()
        .filter(|(i, _)| *i > 0 && *i < path.len() - 1 && i % stride == 0)
        .take(MAX_WAYPOINTS)
        .map(|(_, p)| *p)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(len: usize) -> Vec<LatLon> {
        (0..len)
            .map(|i| LatLon::new(45.0 + i as f64 * 1e-4, -73.0 - i as f64 * 1e-4))
            .collect()
    }

    #[test]
    fn test_trivial_paths_have_no_waypoints() {
        assert!(sample_waypoints(&[]).is_empty());
        assert!(sample_waypoints(&line(1)).is_empty());
        assert!(sample_waypoints(&line(2)).is_empty());
    }

    #[test]
    fn test_short_path_uses_dense_stride() {
        // Path of length 10: interior indices 1..=8, stride 2 keeps
        // indices 2, 4, 6, 8.
        let sampled = sample_waypoints(&line(10));
        assert_eq!(sampled.len(), 4);
        assert!(sampled.len() <= 8, "Only interior points may be sampled");
        assert_eq!(sampled[0], line(10)[2]);
        assert_eq!(sampled[3], line(10)[8]);
    }

    #[test]
    fn test_long_path_respects_waypoint_cap() {
        let sampled = sample_waypoints(&line(1000));
        assert!(sampled.len() <= MAX_WAYPOINTS);
        // 998 interior points / 21 = stride 47
        assert_eq!(sampled.len(), MAX_WAYPOINTS);
    }

    #[test]
    fn test_endpoints_never_sampled() {
        let path = line(30);
        let sampled = sample_waypoints(&path);
        assert!(!sampled.contains(&path[0]));
        assert!(!sampled.contains(&path[path.len() - 1]));
    }

    #[test]
    fn test_threshold_boundary_strides() {
        // 49 interior points, dense stride of 2: indices 2, 4, ..., 48
        // give 24 candidates, which the cap truncates to 21.
        let sampled = sample_waypoints(&line(51));
        assert_eq!(sampled.len(), 21);

        // 50 interior points: 50 / 21 = 2, same stride either way
        let sampled = sample_waypoints(&line(52));
        assert!(sampled.len() <= MAX_WAYPOINTS);
    }

    proptest! {
        #[test]
        fn test_sample_never_exceeds_cap(len in 0usize..2000) {
            prop_assert!(sample_waypoints(&line(len)).len() <= MAX_WAYPOINTS);
        }

        #[test]
        fn test_sample_preserves_traversal_order(len in 3usize..500) {
            let path = line(len);
            let sampled = sample_waypoints(&path);

            // Points on the generated line have strictly increasing
            // latitude, so order preservation is checkable directly.
            for pair in sampled.windows(2) {
                prop_assert!(pair[0].lat < pair[1].lat, "Waypoints reordered");
            }
        }

        #[test]
        fn test_sampled_points_are_interior(len in 3usize..500) {
            let path = line(len);
            let sampled = sample_waypoints(&path);
            for p in &sampled {
                prop_assert!(*p != path[0] && *p != path[len - 1]);
            }
        }
    }
}
