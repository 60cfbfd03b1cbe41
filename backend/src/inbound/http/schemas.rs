//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON shape of their domain counterparts but
//! live in the inbound adapter layer where framework concerns belong. Deeply
//! nested payloads (actions, views) are documented as free-form objects.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A dependency the request needs is not available.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "unknown country XX")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Difficulty`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Difficulty)]
pub enum DifficultySchema {
    Easy,
    Medium,
    Challenging,
    Difficult,
}

/// OpenAPI schema for [`crate::domain::Typology`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Typology)]
pub enum TypologySchema {
    #[schema(rename = "Sports Activities")]
    SportsActivities,
    Vacation,
}

/// OpenAPI schema for [`crate::domain::Adventure`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Adventure, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AdventureSchema {
    #[schema(example = "iceland-001")]
    id: String,
    #[schema(example = "Iceland Ring Road Adventure")]
    name: String,
    /// Country display name.
    #[schema(example = "Iceland")]
    country: String,
    #[schema(example = "IS")]
    country_code: String,
    lat: f64,
    lng: f64,
    /// Duration in days.
    duration: u32,
    difficulty: DifficultySchema,
    typology: TypologySchema,
    /// Base price in whole euros.
    price: u32,
    sale_price: Option<u32>,
    on_sale: bool,
    image_url: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

/// OpenAPI schema for [`crate::domain::PriceRange`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PriceRange)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PriceRangeSchema {
    #[schema(example = 1000)]
    min: u32,
    #[schema(example = 5000)]
    max: u32,
}

/// OpenAPI schema for [`crate::domain::FilterState`].
#[derive(ToSchema)]
#[schema(as = crate::domain::FilterState, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FilterStateSchema {
    /// Free-text query; empty disables the search predicate.
    search: String,
    /// Selected country codes.
    countries: Vec<String>,
    /// Selected durations in days.
    durations: Vec<u32>,
    difficulties: Vec<DifficultySchema>,
    typologies: Vec<TypologySchema>,
    /// Travel dates; recorded but never applied.
    date_range: serde_json::Value,
    price_range: PriceRangeSchema,
}

/// OpenAPI schema for [`crate::domain::SearchResult`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SearchResult, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SearchResultSchema {
    /// `country` or `adventure`.
    #[schema(example = "country", rename = "type")]
    kind: String,
    /// Present on country matches.
    country_code: Option<String>,
    country_name: String,
    /// Present on country matches.
    count: Option<u32>,
    /// Present on adventure matches.
    id: Option<String>,
    /// Present on adventure matches.
    name: Option<String>,
    display_price: Option<u32>,
    #[schema(example = "€1,850")]
    formatted_price: Option<String>,
}

/// OpenAPI schema for [`crate::domain::geo::MapView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::geo::MapView, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MapViewSchema {
    /// `world`, `fit` or `center`.
    #[schema(example = "fit")]
    mode: String,
    /// Present for `world` and `center`.
    center: Option<serde_json::Value>,
    zoom: Option<u8>,
    /// Present for `fit`.
    bounds: Option<serde_json::Value>,
    padding: Option<serde_json::Value>,
    max_zoom: Option<u8>,
}
