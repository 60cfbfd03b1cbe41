//! Catalogue registry types and JSON parsing.
//!
//! The registry holds the adventure records and destination records that seed
//! the explorer. It is loaded from JSON, either from disk or from the copy
//! embedded at compile time.

use std::collections::HashSet;
use std::fs;

use camino::Utf8Path;
use serde::Deserialize;

use crate::error::RegistryError;
use crate::record::{AdventureRecord, DestinationRecord};
use crate::validation::{
    is_valid_adventure_id, is_valid_city_code, is_valid_coordinate, is_valid_country_code,
};

/// Current supported registry version.
pub const SUPPORTED_VERSION: u32 = 1;

const EMBEDDED_CATALOGUE: &str = include_str!("../data/catalogue.json");

/// A validated catalogue registry.
///
/// # Example
///
/// ```
/// use adventure_catalogue::CatalogueRegistry;
///
/// let registry = CatalogueRegistry::embedded().expect("embedded catalogue is valid");
/// assert!(registry
///     .destinations()
///     .iter()
///     .any(|destination| destination.code == "NZ"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueRegistry {
    version: u32,
    adventures: Vec<AdventureRecord>,
    destinations: Vec<DestinationRecord>,
}

impl CatalogueRegistry {
    /// Parses a catalogue registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - The adventures array is empty
    /// - Any identifier, country code, city code or coordinate is invalid
    /// - An adventure id or destination code repeats
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawCatalogueRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a catalogue registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    /// Loads the catalogue compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the embedded document fails validation.
    pub fn embedded() -> Result<Self, RegistryError> {
        Self::from_json(EMBEDDED_CATALOGUE)
    }

    fn from_raw(raw: RawCatalogueRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.adventures.is_empty() {
            return Err(RegistryError::EmptyAdventures);
        }

        validate_adventures(&raw.adventures)?;
        validate_destinations(&raw.destinations)?;

        Ok(Self {
            version: raw.version,
            adventures: raw.adventures,
            destinations: raw.destinations,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the adventure records in catalogue order.
    #[must_use]
    pub fn adventures(&self) -> &[AdventureRecord] {
        &self.adventures
    }

    /// Returns the destination records in catalogue order.
    #[must_use]
    pub fn destinations(&self) -> &[DestinationRecord] {
        &self.destinations
    }

    /// Consumes the registry, yielding its adventure and destination records.
    #[must_use]
    pub fn into_parts(self) -> (Vec<AdventureRecord>, Vec<DestinationRecord>) {
        (self.adventures, self.destinations)
    }
}

fn validate_adventures(adventures: &[AdventureRecord]) -> Result<(), RegistryError> {
    let mut seen = HashSet::with_capacity(adventures.len());
    for (index, adventure) in adventures.iter().enumerate() {
        if !is_valid_adventure_id(&adventure.id) {
            return Err(RegistryError::InvalidAdventureId {
                index,
                value: adventure.id.clone(),
            });
        }
        if !seen.insert(adventure.id.as_str()) {
            return Err(RegistryError::DuplicateAdventureId {
                id: adventure.id.clone(),
            });
        }
        if !is_valid_country_code(&adventure.country_code) {
            return Err(RegistryError::InvalidCountryCode {
                owner: adventure.id.clone(),
                value: adventure.country_code.clone(),
            });
        }
        if !is_valid_coordinate(adventure.lat, adventure.lng) {
            return Err(RegistryError::InvalidCoordinates {
                owner: adventure.id.clone(),
                lat: adventure.lat,
                lng: adventure.lng,
            });
        }
    }
    Ok(())
}

fn validate_destinations(destinations: &[DestinationRecord]) -> Result<(), RegistryError> {
    let mut seen = HashSet::with_capacity(destinations.len());
    for destination in destinations {
        if !is_valid_country_code(&destination.code) {
            return Err(RegistryError::InvalidCountryCode {
                owner: destination.name.clone(),
                value: destination.code.clone(),
            });
        }
        if !seen.insert(destination.code.as_str()) {
            return Err(RegistryError::DuplicateDestination {
                code: destination.code.clone(),
            });
        }
        for city in &destination.cities {
            if !is_valid_city_code(&city.code, &destination.code) {
                return Err(RegistryError::InvalidCityCode {
                    destination: destination.code.clone(),
                    value: city.code.clone(),
                });
            }
            if !is_valid_coordinate(city.lat, city.lng) {
                return Err(RegistryError::InvalidCoordinates {
                    owner: city.code.clone(),
                    lat: city.lat,
                    lng: city.lng,
                });
            }
        }
    }
    Ok(())
}

/// Raw JSON structure for deserialization.
#[derive(Debug, Deserialize)]
struct RawCatalogueRegistry {
    version: u32,
    adventures: Vec<AdventureRecord>,
    #[serde(default)]
    destinations: Vec<DestinationRecord>,
}
