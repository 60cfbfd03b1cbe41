//! Validated, read-only catalogue of adventures and destinations.
//!
//! The catalogue is built once at startup and shared behind an `Arc`. Every
//! query preserves catalogue order, which is the order results are shown in.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use super::adventure::{Adventure, CountryCode};
use super::filter::PriceRange;
use super::geo::LatLng;

/// Errors raised while assembling a [`Catalogue`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// Two adventures share an identifier.
    #[error("duplicate adventure id '{id}'")]
    DuplicateAdventure {
        /// Repeated identifier.
        id: String,
    },
    /// Two destinations share a country code.
    #[error("duplicate destination '{code}'")]
    DuplicateDestination {
        /// Repeated code.
        code: String,
    },
    /// Two cities share a code.
    #[error("duplicate city '{code}'")]
    DuplicateCity {
        /// Repeated code.
        code: String,
    },
}

/// A city point of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    code: String,
    name: String,
    location: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl City {
    /// Construct a city.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        location: LatLng,
        url: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            location,
            url,
        }
    }

    pub fn code(&self) -> &str {
        self.code.as_str()
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn location(&self) -> LatLng {
        self.location
    }
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// A destination country and its known cities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    code: CountryCode,
    name: String,
    cities: Vec<City>,
}

impl Destination {
    /// Construct a destination.
    #[must_use]
    pub fn new(code: CountryCode, name: impl Into<String>, cities: Vec<City>) -> Self {
        Self {
            code,
            name: name.into(),
            cities,
        }
    }

    pub fn code(&self) -> &CountryCode {
        &self.code
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn cities(&self) -> &[City] {
        self.cities.as_slice()
    }
}

/// Country facet option, in first-seen catalogue order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryOption {
    /// Country code.
    pub code: CountryCode,
    /// Country display name.
    pub name: String,
}

/// The in-memory catalogue.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalogue {
    adventures: Vec<Adventure>,
    destinations: Vec<Destination>,
}

impl Catalogue {
    /// Assemble a catalogue, rejecting repeated identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] when an adventure id, destination code or
    /// city code repeats.
    pub fn new(
        adventures: Vec<Adventure>,
        destinations: Vec<Destination>,
    ) -> Result<Self, CatalogueError> {
        let mut ids = HashSet::new();
        for adventure in &adventures {
            if !ids.insert(adventure.id()) {
                return Err(CatalogueError::DuplicateAdventure {
                    id: adventure.id().to_owned(),
                });
            }
        }

        let mut codes = HashSet::new();
        let mut cities = HashSet::new();
        for destination in &destinations {
            if !codes.insert(destination.code()) {
                return Err(CatalogueError::DuplicateDestination {
                    code: destination.code().to_string(),
                });
            }
            for city in destination.cities() {
                if !cities.insert(city.code()) {
                    return Err(CatalogueError::DuplicateCity {
                        code: city.code().to_owned(),
                    });
                }
            }
        }

        Ok(Self {
            adventures,
            destinations,
        })
    }

    /// Every adventure in catalogue order.
    pub fn adventures(&self) -> &[Adventure] {
        self.adventures.as_slice()
    }

    /// Every destination in catalogue order.
    pub fn destinations(&self) -> &[Destination] {
        self.destinations.as_slice()
    }

    /// Look up an adventure by id.
    pub fn adventure(&self, id: &str) -> Option<&Adventure> {
        self.adventures.iter().find(|adventure| adventure.id() == id)
    }

    /// Look up a destination by country code.
    pub fn destination(&self, code: &CountryCode) -> Option<&Destination> {
        self.destinations
            .iter()
            .find(|destination| destination.code() == code)
    }

    /// Look up a city and the destination it belongs to.
    pub fn find_city(&self, code: &str) -> Option<(&Destination, &City)> {
        self.destinations.iter().find_map(|destination| {
            destination
                .cities()
                .iter()
                .find(|city| city.code() == code)
                .map(|city| (destination, city))
        })
    }

    /// Cities known for a country; empty when the country has no destination.
    pub fn cities_of(&self, code: &CountryCode) -> &[City] {
        match self.destination(code) {
            Some(destination) => destination.cities(),
            None => &[],
        }
    }

    /// Whether any adventure or destination uses this country code.
    pub fn has_country(&self, code: &CountryCode) -> bool {
        self.adventures
            .iter()
            .any(|adventure| adventure.country_code() == code)
            || self.destination(code).is_some()
    }

    /// Country display name, preferring the adventure records.
    pub fn country_name(&self, code: &CountryCode) -> Option<&str> {
        self.adventures
            .iter()
            .find(|adventure| adventure.country_code() == code)
            .map(Adventure::country_name)
            .or_else(|| self.destination(code).map(Destination::name))
    }

    /// Distinct countries of the adventures, in first-seen order.
    pub fn countries(&self) -> Vec<CountryOption> {
        let mut seen = HashSet::new();
        self.adventures
            .iter()
            .filter(|adventure| seen.insert(adventure.country_code()))
            .map(|adventure| CountryOption {
                code: adventure.country_code().clone(),
                name: adventure.country_name().to_owned(),
            })
            .collect()
    }

    /// Country codes for the default filter.
    pub fn country_codes(&self) -> BTreeSet<CountryCode> {
        self.adventures
            .iter()
            .map(|adventure| adventure.country_code().clone())
            .collect()
    }

    /// Distinct durations, ascending.
    pub fn durations(&self) -> BTreeSet<u32> {
        self.adventures
            .iter()
            .map(Adventure::duration_days)
            .collect()
    }

    /// Observed effective price range, or `None` for an empty catalogue.
    pub fn price_bounds(&self) -> Option<PriceRange> {
        let prices = self.adventures.iter().map(Adventure::effective_price);
        let min = prices.clone().min()?;
        let max = prices.max()?;
        PriceRange::new(min, max).ok()
    }

    /// Number of adventures for a country.
    pub fn adventure_count(&self, code: &CountryCode) -> usize {
        self.adventures
            .iter()
            .filter(|adventure| adventure.country_code() == code)
            .count()
    }
}
