//! Dropdown search endpoint.
//!
//! ```text
//! GET /api/v1/search?q=jap&limit=5
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Catalogue, DEFAULT_MAX_RESULTS, Error, SearchResult, highlight_match, search,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_catalogue_header;
use crate::inbound::http::schemas::{ErrorSchema, SearchResultSchema};
use crate::inbound::http::state::HttpState;

/// Largest accepted `limit`.
pub const MAX_LIMIT: usize = 50;

/// Query string for [`search_adventures`].
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free-text query; blank returns no results.
    #[serde(default)]
    pub q: String,
    /// Cap on adventure matches. Country matches are never capped.
    pub limit: Option<usize>,
}

/// One search result with its highlighted label.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    #[schema(value_type = SearchResultSchema)]
    pub result: SearchResult,
    /// Label with every match wrapped in `<mark>`.
    #[schema(example = "<mark>Jap</mark>an")]
    pub highlighted: String,
}

/// Search payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The trimmed query that was matched.
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// Search countries and adventures by name.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Country matches then adventure matches", body = SearchResponse),
        (status = 400, description = "Invalid limit", body = ErrorSchema)
    ),
    tags = ["adventures"],
    operation_id = "searchAdventures"
)]
#[get("/search")]
pub async fn search_adventures(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<HttpResponse> {
    let SearchQuery { q, limit } = query.into_inner();
    let limit = limit.unwrap_or(DEFAULT_MAX_RESULTS);
    if limit > MAX_LIMIT {
        return Err(Error::invalid_request(format!("limit must be at most {MAX_LIMIT}"))
            .with_details(serde_json::json!({ "field": "limit", "max": MAX_LIMIT })));
    }

    let trimmed = q.trim();
    Ok(HttpResponse::Ok()
        .insert_header(public_catalogue_header())
        .json(SearchResponse {
            query: trimmed.to_owned(),
            results: search_hits(state.catalogue(), trimmed, limit),
        }))
}

/// Run the dropdown search and highlight each label.
///
/// Shared by the REST endpoint and the WebSocket session.
pub(crate) fn search_hits(catalogue: &Catalogue, query: &str, limit: usize) -> Vec<SearchHit> {
    search(catalogue, query, limit)
        .into_iter()
        .map(|result| SearchHit {
            highlighted: highlight_match(result.label(), query),
            result,
        })
        .collect()
}
