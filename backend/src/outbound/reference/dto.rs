//! DTOs for decoding Natural Earth GeoJSON feature collections.
//!
//! Only what the map needs is kept: the identifying properties and one
//! bounding box per polygon outer ring.

use serde::Deserialize;

use crate::domain::CountryFeature;
use crate::domain::geo::{Bounds, LatLng};

type Position = Vec<f64>;
type Ring = Vec<Position>;

#[derive(Debug, Deserialize)]
pub(super) struct FeatureCollectionDto {
    #[serde(default)]
    pub(super) features: Vec<FeatureDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeatureDto {
    #[serde(default)]
    pub(super) properties: PropertiesDto,
    pub(super) geometry: Option<GeometryDto>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PropertiesDto {
    #[serde(rename = "ISO_A2")]
    pub(super) iso_a2: Option<String>,
    #[serde(rename = "ADMIN")]
    pub(super) admin: Option<String>,
    #[serde(rename = "NAME")]
    pub(super) name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(super) enum GeometryDto {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Unsupported,
}

impl GeometryDto {
    /// Bounds of each polygon's outer ring. Rings without a usable
    /// coordinate are skipped.
    fn polygon_bounds(&self) -> Vec<Bounds> {
        match self {
            Self::Polygon { coordinates } => ring_bounds(coordinates).into_iter().collect(),
            Self::MultiPolygon { coordinates } => coordinates
                .iter()
                .filter_map(|polygon| ring_bounds(polygon))
                .collect(),
            Self::Unsupported => Vec::new(),
        }
    }
}

fn ring_bounds(polygon: &[Ring]) -> Option<Bounds> {
    let outer = polygon.first()?;
    Bounds::from_points(outer.iter().filter_map(|position| position_to_point(position)))
}

fn position_to_point(position: &[f64]) -> Option<LatLng> {
    match position {
        [lng, lat, ..] if lng.is_finite() && lat.is_finite() => Some(LatLng::new(*lat, *lng)),
        _ => None,
    }
}

impl FeatureCollectionDto {
    /// Bounds of every polygon in the collection, for the land layer.
    pub(super) fn into_polygon_bounds(self) -> Vec<Bounds> {
        self.features
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .flat_map(|geometry| geometry.polygon_bounds())
            .collect()
    }

    /// Country features with per-polygon bounds. Features without geometry
    /// are dropped.
    pub(super) fn into_country_features(self) -> Vec<CountryFeature> {
        self.features
            .into_iter()
            .filter_map(|feature| {
                let polygons = feature.geometry?.polygon_bounds();
                if polygons.is_empty() {
                    return None;
                }
                Some(CountryFeature {
                    iso_a2: feature.properties.iso_a2,
                    admin: feature.properties.admin,
                    name: feature.properties.name,
                    polygons,
                })
            })
            .collect()
    }
}
