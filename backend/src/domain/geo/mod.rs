//! Geographic primitives and map viewport heuristics.
//!
//! Everything here is pure arithmetic over WGS84 degrees. The browser map
//! only applies the [`MapView`] values computed by these functions.

mod mainland;
mod viewport;

pub use mainland::{MAINLAND_CITY_WEIGHT, buffer_ratio, country_view, select_mainland};
pub use viewport::{
    ADVENTURE_FOCUS_ZOOM, CITY_FOCUS_ZOOM, COUNTRY_FIT_MAX_ZOOM, DeviceProfile, MOBILE_MAX_WIDTH,
    MapView, Padding, WORLD_CENTER, WORLD_ZOOM, adventure_view, city_view, fit_results,
    zoom_ceiling,
};

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl LatLng {
    /// Construct a point without range checks.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` when both components are finite and inside WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Axis-aligned bounding box.
///
/// ## Invariants
/// - `south <= north` and `west <= east`.
/// - A value always covers at least one point; there is no empty bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl Bounds {
    /// Bounds covering a single point.
    #[must_use]
    pub const fn from_point(point: LatLng) -> Self {
        Self {
            south: point.lat,
            west: point.lng,
            north: point.lat,
            east: point.lng,
        }
    }

    /// Smallest bounds covering every point, or `None` for an empty input.
    ///
    /// # Examples
    /// ```
    /// use adventure_map::domain::geo::{Bounds, LatLng};
    ///
    /// assert!(Bounds::from_points(Vec::<LatLng>::new()).is_none());
    ///
    /// let bounds = Bounds::from_points([LatLng::new(10.0, 20.0), LatLng::new(-5.0, 30.0)])
    ///     .expect("non-empty input");
    /// assert_eq!(bounds.south(), -5.0);
    /// assert_eq!(bounds.east(), 30.0);
    /// ```
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = Self::from_point(iter.next()?);
        Some(iter.fold(first, |bounds, point| bounds.extend(point)))
    }

    /// Build bounds from corner values, normalising swapped corners.
    #[must_use]
    pub fn from_corners(south_west: LatLng, north_east: LatLng) -> Self {
        Self::from_point(south_west).extend(north_east)
    }

    /// Grow the bounds to include `point`.
    #[must_use]
    pub fn extend(self, point: LatLng) -> Self {
        Self {
            south: self.south.min(point.lat),
            west: self.west.min(point.lng),
            north: self.north.max(point.lat),
            east: self.east.max(point.lng),
        }
    }

    /// Southern edge latitude.
    #[must_use]
    pub const fn south(&self) -> f64 {
        self.south
    }

    /// Western edge longitude.
    #[must_use]
    pub const fn west(&self) -> f64 {
        self.west
    }

    /// Northern edge latitude.
    #[must_use]
    pub const fn north(&self) -> f64 {
        self.north
    }

    /// Eastern edge longitude.
    #[must_use]
    pub const fn east(&self) -> f64 {
        self.east
    }

    /// Latitude span in degrees.
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude span in degrees.
    #[must_use]
    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }

    /// Area in square degrees.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.lat_span() * self.lng_span()
    }

    /// Ratio of the longer span to the shorter one.
    ///
    /// Degenerate boxes with a zero-width side report infinity; a single
    /// point reports `1.0`.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        let longer = self.lat_span().max(self.lng_span());
        let shorter = self.lat_span().min(self.lng_span());
        if longer == 0.0 {
            1.0
        } else if shorter == 0.0 {
            f64::INFINITY
        } else {
            longer / shorter
        }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }

    /// Geometric centre.
    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Expand every edge by `ratio` of the corresponding span.
    #[must_use]
    pub fn buffered(&self, ratio: f64) -> Self {
        let lat_buffer = self.lat_span() * ratio;
        let lng_buffer = self.lng_span() * ratio;
        Self {
            south: self.south - lat_buffer,
            west: self.west - lng_buffer,
            north: self.north + lat_buffer,
            east: self.east + lng_buffer,
        }
    }
}
