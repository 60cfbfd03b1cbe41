//! Plain catalogue records as they appear in the registry JSON.
//!
//! Records are structurally validated by the registry loader but carry no
//! business rules. Difficulty and typology stay as labels here; the backend
//! parses them into closed enumerations and enforces the sale-price invariant.

use serde::{Deserialize, Serialize};

/// One bookable adventure package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureRecord {
    /// Stable identifier such as `iceland-001`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Country display name.
    pub country: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Duration in whole days.
    pub duration: u32,
    /// Difficulty label (`Easy`, `Medium`, `Challenging`, `Difficult`).
    pub difficulty: String,
    /// Typology label (`Sports Activities`, `Vacation`).
    pub typology: String,
    /// Base price in whole euros.
    pub price: u32,
    /// Sale price in whole euros, when discounted.
    #[serde(default)]
    pub sale_price: Option<u32>,
    /// Whether the sale price applies.
    #[serde(default)]
    pub on_sale: bool,
    /// Thumbnail image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Package details page URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A destination country with the cities the map can pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRecord {
    /// ISO 3166-1 alpha-2 country code.
    pub code: String,
    /// Country display name.
    pub name: String,
    /// Known cities, in display order.
    #[serde(default)]
    pub cities: Vec<CityRecord>,
}

/// A city point of interest inside a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    /// City code prefixed with its country, such as `IS-REY`.
    pub code: String,
    /// City display name.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Destination page URL.
    #[serde(default)]
    pub url: Option<String>,
}
