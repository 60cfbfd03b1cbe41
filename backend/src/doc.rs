//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint of the inbound layer, the schema
//! wrappers that describe domain types without coupling them to utoipa, and
//! the session cookie that carries the explorer state.
//!
//! The generated document is served by Swagger UI in debug builds and exported
//! via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::adventures::{
    CatalogueResponse, FacetOptions, FilterDefaultsResponse, FilterResponse,
};
use crate::inbound::http::explorer::{ActionRequest, ExplorerResponse};
use crate::inbound::http::map::{TerritoriesResponse, TerritoryResponse};
use crate::inbound::http::schemas::{
    AdventureSchema, DifficultySchema, ErrorCodeSchema, ErrorSchema, FilterStateSchema,
    MapViewSchema, PriceRangeSchema, SearchResultSchema, TypologySchema,
};
use crate::inbound::http::search::{SearchHit, SearchResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie holding the explorer state; issued on first use.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Adventure map API",
        description = "Catalogue, search, map reference data and the session-backed adventure explorer.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::adventures::list_adventures,
        crate::inbound::http::adventures::filter_defaults,
        crate::inbound::http::adventures::filter_adventures,
        crate::inbound::http::search::search_adventures,
        crate::inbound::http::explorer::get_explorer,
        crate::inbound::http::explorer::apply_action,
        crate::inbound::http::map::list_territories,
        crate::inbound::http::map::country_view,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::ws::ws_entry,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        AdventureSchema,
        DifficultySchema,
        TypologySchema,
        PriceRangeSchema,
        FilterStateSchema,
        SearchResultSchema,
        MapViewSchema,
        CatalogueResponse,
        FacetOptions,
        FilterDefaultsResponse,
        FilterResponse,
        SearchHit,
        SearchResponse,
        ActionRequest,
        ExplorerResponse,
        TerritoryResponse,
        TerritoriesResponse,
    )),
    tags(
        (name = "adventures", description = "Catalogue, filtering and search"),
        (name = "explorer", description = "Session-backed explorer state"),
        (name = "map", description = "Territories and country viewports"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
