//! Registry-backed catalogue source.
//!
//! Reads the `adventure-catalogue` registry (embedded or from a file) and maps
//! its plain records into validated domain types.

use adventure_catalogue::{AdventureRecord, CatalogueRegistry, DestinationRecord, RegistryError};
use async_trait::async_trait;
use camino::Utf8PathBuf;

use crate::domain::geo::LatLng;
use crate::domain::ports::{CatalogueSource, CatalogueSourceError};
use crate::domain::{Adventure, AdventureDraft, Catalogue, City, CountryCode, Destination};

/// Where the registry JSON lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryLocation {
    /// The copy compiled into `adventure-catalogue`.
    Embedded,
    /// A registry file on disk.
    File(Utf8PathBuf),
}

/// Catalogue source reading the JSON registry.
#[derive(Debug, Clone)]
pub struct RegistryCatalogueSource {
    location: RegistryLocation,
}

impl RegistryCatalogueSource {
    /// Source over the embedded registry.
    #[must_use]
    pub const fn embedded() -> Self {
        Self {
            location: RegistryLocation::Embedded,
        }
    }

    /// Source over a registry file.
    #[must_use]
    pub fn from_path(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            location: RegistryLocation::File(path.into()),
        }
    }

    /// Registry location this source reads.
    pub fn location(&self) -> &RegistryLocation {
        &self.location
    }

    /// Read and map the registry synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueSourceError::Read`] when the file cannot be read and
    /// [`CatalogueSourceError::Invalid`] when any record breaks a rule.
    pub fn load_catalogue(&self) -> Result<Catalogue, CatalogueSourceError> {
        let registry = match &self.location {
            RegistryLocation::Embedded => CatalogueRegistry::embedded(),
            RegistryLocation::File(path) => CatalogueRegistry::from_file(path),
        }
        .map_err(map_registry_error)?;

        let (adventure_records, destination_records) = registry.into_parts();
        let adventures = adventure_records
            .into_iter()
            .map(map_adventure)
            .collect::<Result<Vec<_>, _>>()?;
        let destinations = destination_records
            .into_iter()
            .map(map_destination)
            .collect::<Result<Vec<_>, _>>()?;

        Catalogue::new(adventures, destinations)
            .map_err(|err| CatalogueSourceError::invalid(err.to_string()))
    }
}

#[async_trait]
impl CatalogueSource for RegistryCatalogueSource {
    async fn load(&self) -> Result<Catalogue, CatalogueSourceError> {
        self.load_catalogue()
    }
}

fn map_registry_error(error: RegistryError) -> CatalogueSourceError {
    match error {
        RegistryError::IoError { .. } => CatalogueSourceError::read(error.to_string()),
        _ => CatalogueSourceError::invalid(error.to_string()),
    }
}

fn map_adventure(record: AdventureRecord) -> Result<Adventure, CatalogueSourceError> {
    let id = record.id.clone();
    Adventure::new(AdventureDraft {
        id: record.id,
        name: record.name,
        country_name: record.country,
        country_code: record.country_code,
        lat: record.lat,
        lng: record.lng,
        duration_days: record.duration,
        difficulty: record.difficulty,
        typology: record.typology,
        price: record.price,
        sale_price: record.sale_price,
        on_sale: record.on_sale,
        image_url: record.image_url,
        url: record.url,
        description: record.description,
    })
    .map_err(|err| CatalogueSourceError::invalid(format!("adventure '{id}': {err}")))
}

fn map_destination(record: DestinationRecord) -> Result<Destination, CatalogueSourceError> {
    let code = CountryCode::new(&record.code).map_err(|err| {
        CatalogueSourceError::invalid(format!("destination '{}': {err}", record.code))
    })?;
    let cities = record
        .cities
        .into_iter()
        .map(|city| City::new(city.code, city.name, LatLng::new(city.lat, city.lng), city.url))
        .collect();
    Ok(Destination::new(code, record.name, cities))
}
