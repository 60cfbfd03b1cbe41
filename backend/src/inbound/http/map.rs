//! Map reference endpoints.
//!
//! ```text
//! GET /api/v1/map/territories
//! GET /api/v1/map/countries/{code}/view
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::geo::{Bounds, LatLng, MapView};
use crate::domain::{CountryCode, Error, Territory};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_catalogue_header;
use crate::inbound::http::schemas::{ErrorSchema, MapViewSchema};
use crate::inbound::http::state::HttpState;

/// One catalogue country with its shapes and mainland view.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TerritoryResponse {
    #[schema(value_type = String, example = "NO")]
    pub code: CountryCode,
    pub name: String,
    /// One bounding box per polygon.
    #[schema(value_type = Vec<serde_json::Value>)]
    pub shapes: Vec<Bounds>,
    /// Known city points.
    #[schema(value_type = Vec<serde_json::Value>)]
    pub cities: Vec<LatLng>,
    #[schema(value_type = MapViewSchema)]
    pub view: MapView,
}

impl From<&Territory> for TerritoryResponse {
    fn from(territory: &Territory) -> Self {
        Self {
            code: territory.code().clone(),
            name: territory.name().to_owned(),
            shapes: territory.shapes().to_vec(),
            cities: territory.cities().to_vec(),
            view: territory.view(),
        }
    }
}

/// Land layer and derived territories.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TerritoriesResponse {
    /// False when the land layer could not be loaded.
    pub land_available: bool,
    /// One bounding box per land polygon; empty when unavailable.
    #[schema(value_type = Vec<serde_json::Value>)]
    pub land: Vec<Bounds>,
    pub territories: Vec<TerritoryResponse>,
}

/// List derived territories.
#[utoipa::path(
    get,
    path = "/api/v1/map/territories",
    responses(
        (status = 200, description = "Territories", body = TerritoriesResponse)
    ),
    tags = ["map"],
    operation_id = "listTerritories"
)]
#[get("/map/territories")]
pub async fn list_territories(state: web::Data<HttpState>) -> HttpResponse {
    let response = TerritoriesResponse {
        land_available: state.explorer.land_available(),
        land: state.explorer.land().to_vec(),
        territories: state
            .territories()
            .territories()
            .iter()
            .map(TerritoryResponse::from)
            .collect(),
    };
    HttpResponse::Ok()
        .insert_header(public_catalogue_header())
        .json(response)
}

/// Mainland viewport for one catalogue country.
///
/// Countries without reference shapes fall back to the world view.
#[utoipa::path(
    get,
    path = "/api/v1/map/countries/{code}/view",
    params(("code" = String, Path, description = "Two-letter country code", example = "NO")),
    responses(
        (status = 200, description = "Viewport", body = MapViewSchema),
        (status = 400, description = "Malformed country code", body = ErrorSchema),
        (status = 404, description = "Country not in the catalogue", body = ErrorSchema)
    ),
    tags = ["map"],
    operation_id = "getCountryView"
)]
#[get("/map/countries/{code}/view")]
pub async fn country_view(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let code = CountryCode::new(&raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(serde_json::json!({ "field": "code", "value": raw }))
    })?;
    if !state.catalogue().has_country(&code) {
        return Err(Error::not_found(format!("unknown country {code}"))
            .with_details(serde_json::json!({ "country": code })));
    }
    Ok(HttpResponse::Ok()
        .insert_header(public_catalogue_header())
        .json(state.territories().country_view(&code)))
}
