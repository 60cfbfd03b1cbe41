//! Static adventure and destination catalogue for the Adventure Atlas explorer.
//!
//! This crate owns the catalogue registry format: a versioned JSON document
//! listing bookable adventures and the destinations (countries with their
//! known cities) the map can highlight. It is deliberately independent of the
//! backend domain types; the backend maps these plain records into validated
//! domain aggregates.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading catalogue registries from JSON strings or files
//! - An embedded default registry compiled into the binary
//! - Structural validation (version, identifiers, country codes, coordinates)
//!
//! # Example
//!
//! ```
//! use adventure_catalogue::CatalogueRegistry;
//!
//! let json = r#"{
//!     "version": 1,
//!     "adventures": [{
//!         "id": "iceland-001",
//!         "name": "Northern Lights Photography Expedition",
//!         "country": "Iceland",
//!         "countryCode": "IS",
//!         "lat": 64.9631,
//!         "lng": -19.0208,
//!         "duration": 7,
//!         "difficulty": "Medium",
//!         "typology": "Sports Activities",
//!         "price": 1850,
//!         "salePrice": null,
//!         "onSale": false
//!     }],
//!     "destinations": []
//! }"#;
//!
//! let registry = CatalogueRegistry::from_json(json).expect("valid registry");
//! assert_eq!(registry.adventures().len(), 1);
//! ```

mod error;
mod record;
mod registry;
mod validation;

pub use error::RegistryError;
pub use record::{AdventureRecord, CityRecord, DestinationRecord};
pub use registry::{CatalogueRegistry, SUPPORTED_VERSION};
pub use validation::{is_valid_adventure_id, is_valid_city_code, is_valid_country_code};
