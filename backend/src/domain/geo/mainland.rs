//! "Best mainland" selection for countries made of several polygons.
//!
//! Countries such as Norway, Portugal or France ship overseas territories in
//! the same feature. Fitting the map to the union of every polygon zooms out
//! to half the globe, so the view is fitted to the single polygon that holds
//! the country's known cities instead.

use super::{Bounds, LatLng, MapView};

/// Score contributed by each known city contained in a shape.
pub const MAINLAND_CITY_WEIGHT: f64 = 1000.0;

/// Pick the shape that best represents the country's mainland.
///
/// Each shape scores `cities_contained * 1000 + area` when the country has
/// known cities, and its area alone otherwise. The first shape wins ties.
/// Returns `None` when there are no shapes.
///
/// # Examples
/// ```
/// use adventure_map::domain::geo::{Bounds, LatLng, select_mainland};
///
/// let svalbard = Bounds::from_corners(LatLng::new(76.0, 10.0), LatLng::new(81.0, 34.0));
/// let mainland = Bounds::from_corners(LatLng::new(58.0, 4.0), LatLng::new(71.0, 31.0));
/// let oslo = LatLng::new(59.91, 10.75);
///
/// assert_eq!(select_mainland(&[svalbard, mainland], &[oslo]), Some(mainland));
/// ```
#[must_use]
pub fn select_mainland(shapes: &[Bounds], cities: &[LatLng]) -> Option<Bounds> {
    let mut best: Option<(Bounds, f64)> = None;
    for shape in shapes {
        let score = mainland_score(shape, cities);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((*shape, score)),
        }
    }
    best.map(|(shape, _)| shape)
}

fn mainland_score(shape: &Bounds, cities: &[LatLng]) -> f64 {
    let area = shape.area();
    if cities.is_empty() {
        return area;
    }
    let contained = cities.iter().filter(|city| shape.contains(**city)).count();
    f64::from(u32::try_from(contained).unwrap_or(u32::MAX)) * MAINLAND_CITY_WEIGHT + area
}

/// Buffer ratio applied around the mainland before fitting.
///
/// Elongated shapes get a tighter buffer so the fit does not drift far from
/// the land: aspect ratio `>= 3.0` gives 10%, `>= 2.0` gives 15%, anything
/// more compact gives 25%.
#[must_use]
pub fn buffer_ratio(bounds: &Bounds) -> f64 {
    let aspect = bounds.aspect_ratio();
    if aspect >= 3.0 {
        0.10
    } else if aspect >= 2.0 {
        0.15
    } else {
        0.25
    }
}

/// Viewport for a single country.
///
/// Falls back to the world view when the country has no usable shapes.
#[must_use]
pub fn country_view(shapes: &[Bounds], cities: &[LatLng]) -> MapView {
    match select_mainland(shapes, cities) {
        Some(mainland) => MapView::country_fit(mainland.buffered(buffer_ratio(&mainland))),
        None => MapView::world(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::{COUNTRY_FIT_MAX_ZOOM, Padding};
    use rstest::rstest;

    fn shape(south: f64, west: f64, north: f64, east: f64) -> Bounds {
        Bounds::from_corners(LatLng::new(south, west), LatLng::new(north, east))
    }

    #[rstest]
    fn prefers_the_shape_containing_cities_over_a_larger_one() {
        let overseas = shape(-30.0, 40.0, 10.0, 80.0);
        let mainland = shape(36.9, -9.5, 42.2, -6.2);
        let cities = [LatLng::new(38.72, -9.14), LatLng::new(41.15, -8.61)];
        assert_eq!(select_mainland(&[overseas, mainland], &cities), Some(mainland));
    }

    #[rstest]
    fn without_cities_the_largest_shape_wins() {
        let small = shape(0.0, 0.0, 1.0, 1.0);
        let large = shape(0.0, 0.0, 5.0, 5.0);
        assert_eq!(select_mainland(&[small, large], &[]), Some(large));
    }

    #[rstest]
    fn cities_outside_every_shape_fall_back_to_area() {
        let small = shape(0.0, 0.0, 1.0, 1.0);
        let large = shape(0.0, 0.0, 5.0, 5.0);
        let far_away = [LatLng::new(60.0, 60.0)];
        assert_eq!(select_mainland(&[small, large], &far_away), Some(large));
    }

    #[rstest]
    fn first_shape_wins_ties() {
        let first = shape(0.0, 0.0, 2.0, 2.0);
        let second = shape(10.0, 10.0, 12.0, 12.0);
        assert_eq!(select_mainland(&[first, second], &[]), Some(first));
    }

    #[rstest]
    fn no_shapes_means_no_mainland() {
        assert_eq!(select_mainland(&[], &[LatLng::new(1.0, 1.0)]), None);
        assert_eq!(country_view(&[], &[]), MapView::world());
    }

    #[rstest]
    #[case(shape(0.0, 0.0, 12.0, 3.0), 0.10)]
    #[case(shape(0.0, 0.0, 3.0, 6.0), 0.15)]
    #[case(shape(0.0, 0.0, 4.0, 5.0), 0.25)]
    fn buffer_tightens_for_elongated_shapes(#[case] bounds: Bounds, #[case] expected: f64) {
        assert_eq!(buffer_ratio(&bounds), expected);
    }

    #[rstest]
    fn country_view_buffers_the_mainland() {
        let mainland = shape(0.0, 0.0, 4.0, 4.0);
        match country_view(&[mainland], &[]) {
            MapView::Fit {
                bounds,
                padding,
                max_zoom,
            } => {
                assert_eq!(bounds, shape(-1.0, -1.0, 5.0, 5.0));
                assert_eq!(padding, Padding::uniform([50, 50]));
                assert_eq!(max_zoom, COUNTRY_FIT_MAX_ZOOM);
            }
            other => panic!("expected fit, got {other:?}"),
        }
    }
}
