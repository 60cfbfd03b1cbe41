//! Association between catalogue countries and reference territory shapes.
//!
//! Reference data arrives as Natural Earth country features. Each feature is
//! reduced to one bounding box per polygon; the index joins those shapes with
//! the catalogue's known cities so the mainland heuristic can run per country.

use serde::Serialize;

use super::adventure::CountryCode;
use super::catalogue::Catalogue;
use super::geo::{Bounds, LatLng, MapView, country_view};

/// ISO code Natural Earth reports when a country has no assigned code.
const UNASSIGNED_ISO: &str = "-99";

/// A reference country feature reduced to per-polygon bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    /// `ISO_A2` property, if present.
    pub iso_a2: Option<String>,
    /// `ADMIN` property, if present.
    pub admin: Option<String>,
    /// `NAME` property, if present.
    pub name: Option<String>,
    /// One bounding box per polygon of the feature geometry.
    pub polygons: Vec<Bounds>,
}

impl CountryFeature {
    /// Whether the feature carries the country's assigned ISO code.
    fn iso_matches(&self, code: &CountryCode) -> bool {
        self.iso_a2
            .as_deref()
            .map(str::trim)
            .is_some_and(|iso| iso != UNASSIGNED_ISO && iso.eq_ignore_ascii_case(code.as_str()))
    }

    /// Whether `ADMIN`, or failing that `NAME`, equals the country name.
    fn name_matches(&self, country_name: &str) -> bool {
        [self.admin.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .any(|label| label.trim().to_lowercase() == country_name.trim().to_lowercase())
    }
}

/// Feature for one catalogue country.
///
/// Every feature is searched by ISO code before any name is compared, so an
/// exact ISO hit always beats a name match on another feature.
fn find_feature<'a>(
    features: &'a [CountryFeature],
    code: &CountryCode,
    country_name: &str,
) -> Option<&'a CountryFeature> {
    features
        .iter()
        .find(|feature| feature.iso_matches(code))
        .or_else(|| {
            features
                .iter()
                .find(|feature| feature.name_matches(country_name))
        })
}

/// Reference geography loaded at startup.
///
/// An empty value means the reference fetch failed or was disabled; the map
/// then runs without a land layer and without territories.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceData {
    /// Bounds of each land polygon.
    pub land: Vec<Bounds>,
    /// Country features.
    pub countries: Vec<CountryFeature>,
}

impl ReferenceData {
    /// Reference data that failed to load.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Whether a land layer can be drawn.
    #[must_use]
    pub fn land_available(&self) -> bool {
        !self.land.is_empty()
    }
}

/// Shapes and city points of one catalogue country.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Territory {
    code: CountryCode,
    name: String,
    shapes: Vec<Bounds>,
    cities: Vec<LatLng>,
}

impl Territory {
    /// Catalogue country code.
    #[must_use]
    pub fn code(&self) -> &CountryCode {
        &self.code
    }

    /// Catalogue country name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Bounds of each polygon of the matched feature.
    #[must_use]
    pub fn shapes(&self) -> &[Bounds] {
        self.shapes.as_slice()
    }

    /// Destination city points inside the country.
    #[must_use]
    pub fn cities(&self) -> &[LatLng] {
        self.cities.as_slice()
    }

    /// Mainland viewport for this territory.
    #[must_use]
    pub fn view(&self) -> MapView {
        country_view(&self.shapes, &self.cities)
    }
}

/// Territories for every catalogue country that has a reference feature.
///
/// Countries are taken from the adventures first and then from destinations
/// without adventures, each once. A country without a matching feature has no
/// territory; it keeps its markers but gets no overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerritoryIndex {
    territories: Vec<Territory>,
}

impl TerritoryIndex {
    /// Join catalogue countries with reference features.
    ///
    /// # Examples
    /// ```
    /// use adventure_map::domain::{Catalogue, ReferenceData, TerritoryIndex};
    ///
    /// let index = TerritoryIndex::build(&Catalogue::default(), &ReferenceData::unavailable());
    /// assert!(index.territories().is_empty());
    /// ```
    #[must_use]
    pub fn build(catalogue: &Catalogue, reference: &ReferenceData) -> Self {
        let mut countries: Vec<(CountryCode, String)> = catalogue
            .countries()
            .into_iter()
            .map(|option| (option.code, option.name))
            .collect();
        for destination in catalogue.destinations() {
            if !countries.iter().any(|(code, _)| code == destination.code()) {
                countries.push((destination.code().clone(), destination.name().to_owned()));
            }
        }

        let territories = countries
            .into_iter()
            .filter_map(|(code, name)| {
                let feature = find_feature(&reference.countries, &code, &name)?;
                let cities = catalogue
                    .cities_of(&code)
                    .iter()
                    .map(|city| city.location())
                    .collect();
                Some(Territory {
                    shapes: feature.polygons.clone(),
                    cities,
                    code,
                    name,
                })
            })
            .collect();
        Self { territories }
    }

    /// Every territory in catalogue order.
    #[must_use]
    pub fn territories(&self) -> &[Territory] {
        self.territories.as_slice()
    }

    /// Territory for a country, if it has one.
    #[must_use]
    pub fn territory(&self, code: &CountryCode) -> Option<&Territory> {
        self.territories
            .iter()
            .find(|territory| territory.code() == code)
    }

    /// Mainland viewport for a country; the world view when it has no
    /// territory.
    #[must_use]
    pub fn country_view(&self, code: &CountryCode) -> MapView {
        self.territory(code)
            .map_or_else(MapView::world, Territory::view)
    }
}
