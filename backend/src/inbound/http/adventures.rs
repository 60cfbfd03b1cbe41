//! Catalogue and filter endpoints.
//!
//! ```text
//! GET  /api/v1/adventures
//! GET  /api/v1/filters/defaults
//! POST /api/v1/adventures/filter
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Adventure, CountryOption, Destination, Difficulty, FilterState, PriceRange, ResultCard,
    Typology, cards_for,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_catalogue_header;
use crate::inbound::http::schemas::{
    AdventureSchema, ErrorSchema, FilterStateSchema, PriceRangeSchema,
};
use crate::inbound::http::state::HttpState;

/// Full catalogue payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueResponse {
    /// Every adventure in catalogue order.
    #[schema(value_type = Vec<AdventureSchema>)]
    pub adventures: Vec<Adventure>,
    /// Destination countries and their cities.
    #[schema(value_type = Vec<serde_json::Value>)]
    pub destinations: Vec<Destination>,
}

/// Values each filter facet can take.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacetOptions {
    /// Countries in first-seen catalogue order.
    #[schema(value_type = Vec<serde_json::Value>)]
    pub countries: Vec<CountryOption>,
    /// Distinct durations in days, ascending.
    pub durations: Vec<u32>,
    #[schema(value_type = Vec<String>)]
    pub difficulties: Vec<Difficulty>,
    #[schema(value_type = Vec<String>)]
    pub typologies: Vec<Typology>,
    /// Observed effective price bounds; absent for an empty catalogue.
    #[schema(value_type = Option<PriceRangeSchema>)]
    pub price_bounds: Option<PriceRange>,
}

/// Default filter state plus facet options.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefaultsResponse {
    #[schema(value_type = FilterStateSchema)]
    pub defaults: FilterState,
    pub options: FacetOptions,
}

/// Cards matching a filter state.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterResponse {
    #[schema(value_type = Vec<serde_json::Value>)]
    pub cards: Vec<ResultCard>,
    pub result_count: usize,
    /// Whether any filter differs from its default.
    pub clear_all_enabled: bool,
}

/// List the full catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/adventures",
    responses(
        (status = 200, description = "Catalogue", body = CatalogueResponse)
    ),
    tags = ["adventures"],
    operation_id = "listAdventures"
)]
#[get("/adventures")]
pub async fn list_adventures(state: web::Data<HttpState>) -> HttpResponse {
    let catalogue = state.catalogue();
    HttpResponse::Ok()
        .insert_header(public_catalogue_header())
        .json(CatalogueResponse {
            adventures: catalogue.adventures().to_vec(),
            destinations: catalogue.destinations().to_vec(),
        })
}

/// Default filters and the options of every facet.
#[utoipa::path(
    get,
    path = "/api/v1/filters/defaults",
    responses(
        (status = 200, description = "Default filters", body = FilterDefaultsResponse)
    ),
    tags = ["adventures"],
    operation_id = "getFilterDefaults"
)]
#[get("/filters/defaults")]
pub async fn filter_defaults(state: web::Data<HttpState>) -> HttpResponse {
    let catalogue = state.catalogue();
    let response = FilterDefaultsResponse {
        defaults: FilterState::defaults_for(catalogue),
        options: FacetOptions {
            countries: catalogue.countries(),
            durations: catalogue.durations().into_iter().collect(),
            difficulties: Difficulty::ALL.to_vec(),
            typologies: Typology::ALL.to_vec(),
            price_bounds: catalogue.price_bounds(),
        },
    };
    HttpResponse::Ok()
        .insert_header(public_catalogue_header())
        .json(response)
}

/// Apply a filter state to the catalogue.
///
/// An inverted price range fails body decoding and is answered with 400.
#[utoipa::path(
    post,
    path = "/api/v1/adventures/filter",
    request_body = FilterStateSchema,
    responses(
        (status = 200, description = "Filtered cards", body = FilterResponse),
        (status = 400, description = "Invalid filter state", body = ErrorSchema)
    ),
    tags = ["adventures"],
    operation_id = "filterAdventures"
)]
#[post("/adventures/filter")]
pub async fn filter_adventures(
    state: web::Data<HttpState>,
    payload: web::Json<FilterState>,
) -> ApiResult<web::Json<FilterResponse>> {
    let filters = payload.into_inner();
    let catalogue = state.catalogue();
    let cards = cards_for(catalogue, &filters, None);
    Ok(web::Json(FilterResponse {
        result_count: cards.len(),
        cards,
        clear_all_enabled: !filters.is_default_for(catalogue),
    }))
}
