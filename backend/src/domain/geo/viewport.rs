//! Viewport selection for result sets, cities and adventures.

use serde::{Deserialize, Serialize};

use super::{Bounds, LatLng};

/// Widest viewport, in CSS pixels, still treated as a mobile device.
pub const MOBILE_MAX_WIDTH: u32 = 768;
/// Centre of the fallback world view.
pub const WORLD_CENTER: LatLng = LatLng::new(45.0, 10.0);
/// Zoom of the fallback world view.
pub const WORLD_ZOOM: u8 = 3;
/// Zoom ceiling when fitting a single country.
pub const COUNTRY_FIT_MAX_ZOOM: u8 = 8;
/// Zoom used when centring on a selected city.
pub const CITY_FOCUS_ZOOM: u8 = 7;
/// Zoom used when centring on a selected adventure.
pub const ADVENTURE_FOCUS_ZOOM: u8 = 6;

const COUNTRY_FIT_PADDING: [u32; 2] = [50, 50];

/// Client viewport dimensions reported with each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    /// Viewport width in CSS pixels.
    pub viewport_width: u32,
    /// Viewport height in CSS pixels.
    pub viewport_height: u32,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            viewport_width: 1440,
            viewport_height: 900,
        }
    }
}

impl DeviceProfile {
    /// Mobile layouts start at or below [`MOBILE_MAX_WIDTH`].
    #[must_use]
    pub const fn is_mobile(&self) -> bool {
        self.viewport_width <= MOBILE_MAX_WIDTH
    }

    /// Portrait when taller than wide.
    #[must_use]
    pub const fn is_portrait(&self) -> bool {
        self.viewport_height > self.viewport_width
    }

    /// Fit padding leaving room for the sidebar or the mobile sheets.
    #[must_use]
    pub const fn fit_padding(&self) -> Padding {
        match (self.is_mobile(), self.is_portrait()) {
            (true, true) => Padding::new([20, 100], [20, 120]),
            (true, false) => Padding::new([20, 120], [20, 100]),
            (false, _) => Padding::new([340, 100], [20, 20]),
        }
    }
}

/// Pixel padding applied when fitting bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Padding {
    /// `[x, y]` padding from the top-left corner.
    pub top_left: [u32; 2],
    /// `[x, y]` padding from the bottom-right corner.
    pub bottom_right: [u32; 2],
}

impl Padding {
    /// Construct padding from both corners.
    #[must_use]
    pub const fn new(top_left: [u32; 2], bottom_right: [u32; 2]) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Same padding on both corners.
    #[must_use]
    pub const fn uniform(value: [u32; 2]) -> Self {
        Self::new(value, value)
    }
}

/// Instruction for the client map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum MapView {
    /// Fixed world overview.
    World {
        /// View centre.
        center: LatLng,
        /// Zoom level.
        zoom: u8,
    },
    /// Fit the map to bounds.
    #[serde(rename_all = "camelCase")]
    Fit {
        /// Bounds to show.
        bounds: Bounds,
        /// Pixel padding around the bounds.
        padding: Padding,
        /// Zoom ceiling for the fit.
        max_zoom: u8,
    },
    /// Centre on a point.
    Center {
        /// View centre.
        center: LatLng,
        /// Zoom level.
        zoom: u8,
    },
}

impl MapView {
    /// The fallback world overview.
    #[must_use]
    pub const fn world() -> Self {
        Self::World {
            center: WORLD_CENTER,
            zoom: WORLD_ZOOM,
        }
    }

    /// Fit bounds with the fixed single-country padding and zoom ceiling.
    #[must_use]
    pub const fn country_fit(bounds: Bounds) -> Self {
        Self::Fit {
            bounds,
            padding: Padding::uniform(COUNTRY_FIT_PADDING),
            max_zoom: COUNTRY_FIT_MAX_ZOOM,
        }
    }
}

/// Zoom ceiling for a global fit over `result_count` points.
///
/// # Examples
/// ```
/// use adventure_map::domain::geo::{DeviceProfile, zoom_ceiling};
///
/// let desktop = DeviceProfile::default();
/// assert_eq!(zoom_ceiling(1, &desktop), 8);
/// assert_eq!(zoom_ceiling(3, &desktop), 6);
/// assert_eq!(zoom_ceiling(9, &desktop), 5);
/// ```
#[must_use]
pub const fn zoom_ceiling(result_count: usize, device: &DeviceProfile) -> u8 {
    let mobile = device.is_mobile();
    match result_count {
        0 | 1 => 8,
        2..=3 => 6,
        4..=8 => {
            if mobile {
                5
            } else {
                6
            }
        }
        _ => {
            if mobile {
                4
            } else {
                5
            }
        }
    }
}

/// Fit every point of the current result set, falling back to the world
/// view when there is nothing to show.
#[must_use]
pub fn fit_results(points: &[LatLng], device: &DeviceProfile) -> MapView {
    match Bounds::from_points(points.iter().copied()) {
        Some(bounds) => MapView::Fit {
            bounds,
            padding: device.fit_padding(),
            max_zoom: zoom_ceiling(points.len(), device),
        },
        None => MapView::world(),
    }
}

/// Centre on a selected city.
#[must_use]
pub const fn city_view(point: LatLng) -> MapView {
    MapView::Center {
        center: point,
        zoom: CITY_FOCUS_ZOOM,
    }
}

/// Centre on a selected adventure.
#[must_use]
pub const fn adventure_view(point: LatLng) -> MapView {
    MapView::Center {
        center: point,
        zoom: ADVENTURE_FOCUS_ZOOM,
    }
}
