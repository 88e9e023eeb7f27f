//! Geographic primitives shared across the crate.
//!
//! Provides the WGS84 point type used for route paths, place coordinates
//! and position fixes, plus a growable bounding region for viewport fitting.

/// A WGS84 geographic point in degrees.
///
/// Latitude is positive north, longitude positive east. The backend wire
/// format transmits `[lon, lat]` pairs; conversion happens at the wire
/// boundary, never here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLon {
    /// Create a new geographic point.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

/// An axis-aligned geographic bounding region.
///
/// Grows to contain every point passed to [`GeoBounds::extend`]. Used to
/// fit the map viewport around every point of every rendered candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Southernmost latitude.
    pub south: f64,
    /// Westernmost longitude.
    pub west: f64,
    /// Northernmost latitude.
    pub north: f64,
    /// Easternmost longitude.
    pub east: f64,
}

impl GeoBounds {
    /// Create a degenerate bounding region containing a single point.
    pub fn from_point(point: LatLon) -> Self {
        Self {
            south: point.lat,
            west: point.lon,
            north: point.lat,
            east: point.lon,
        }
    }

    /// Build a bounding region containing every point, or `None` when the
    /// iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLon>,
    {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Grow the region to contain the given point.
    pub fn extend(&mut self, point: LatLon) {
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
        self.west = self.west.min(point.lon);
        self.east = self.east.max(point.lon);
    }

    /// Geometric center of the region.
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Whether the region contains the given point (inclusive edges).
    pub fn contains(&self, point: LatLon) -> bool {
        (self.south..=self.north).contains(&point.lat)
            && (self.west..=self.east).contains(&point.lon)
    }
}
