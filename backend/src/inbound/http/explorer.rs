//! Session-backed explorer endpoints.
//!
//! ```text
//! GET  /api/v1/explorer
//! POST /api/v1/explorer/actions
//! ```
//!
//! The explorer state lives in the private session cookie. Each action is
//! reduced against it, the result is stored back, and the rendered view is
//! returned alongside the new state.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::geo::DeviceProfile;
use crate::domain::{Error, ExplorerAction, ExplorerState, ExplorerView, reduce, render};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Viewport reported by the client; desktop defaults apply when absent.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ViewportQuery {
    pub viewport_width: Option<u32>,
    pub viewport_height: Option<u32>,
}

impl ViewportQuery {
    fn device(&self) -> DeviceProfile {
        let fallback = DeviceProfile::default();
        DeviceProfile {
            viewport_width: self.viewport_width.unwrap_or(fallback.viewport_width),
            viewport_height: self.viewport_height.unwrap_or(fallback.viewport_height),
        }
    }
}

/// Body of [`apply_action`].
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// One explorer action, tagged by `type`.
    #[schema(value_type = Object)]
    pub action: ExplorerAction,
    #[serde(default)]
    #[schema(value_type = Option<serde_json::Value>)]
    pub device: Option<DeviceProfile>,
}

/// Explorer state and its rendering.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerResponse {
    #[schema(value_type = Object)]
    pub state: ExplorerState,
    #[schema(value_type = Object)]
    pub view: ExplorerView,
}

fn respond(
    state: &HttpState,
    explorer: ExplorerState,
    device: &DeviceProfile,
) -> HttpResponse {
    let view = render(&state.explorer, &explorer, device);
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(ExplorerResponse {
            state: explorer,
            view,
        })
}

/// Current explorer state of this session.
#[utoipa::path(
    get,
    path = "/api/v1/explorer",
    params(ViewportQuery),
    responses(
        (status = 200, description = "State and view", body = ExplorerResponse)
    ),
    tags = ["explorer"],
    operation_id = "getExplorer",
    security(("SessionCookie" = []))
)]
#[get("/explorer")]
pub async fn get_explorer(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewport: web::Query<ViewportQuery>,
) -> HttpResponse {
    let explorer = session.explorer_state(state.catalogue());
    respond(&state, explorer, &viewport.device())
}

/// Apply one action and store the result in the session.
#[utoipa::path(
    post,
    path = "/api/v1/explorer/actions",
    request_body = ActionRequest,
    responses(
        (status = 200, description = "New state and view", body = ExplorerResponse),
        (status = 400, description = "Malformed action or inverted price range", body = ErrorSchema),
        (status = 404, description = "Unknown country, city or adventure", body = ErrorSchema)
    ),
    tags = ["explorer"],
    operation_id = "applyExplorerAction",
    security(("SessionCookie" = []))
)]
#[post("/explorer/actions")]
pub async fn apply_action(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ActionRequest>,
) -> ApiResult<HttpResponse> {
    let ActionRequest { action, device } = payload.into_inner();
    let current = session.explorer_state(state.catalogue());
    debug!(?action, "applying explorer action");
    let next = reduce(state.catalogue(), &current, action).map_err(Error::from)?;
    session.persist_explorer_state(&next)?;
    Ok(respond(&state, next, &device.unwrap_or_default()))
}

#[cfg(test)]
#[path = "explorer_tests.rs"]
mod tests;
