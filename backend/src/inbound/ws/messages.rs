//! Wire-level message definitions for the WebSocket adapter.
//!
//! Clients send tagged [`ClientMessage`]s; the session answers with tagged
//! [`ServerMessage`]s carrying the trace id of the frame that caused them.

use serde::{Deserialize, Serialize};

use crate::domain::geo::DeviceProfile;
use crate::domain::{Error, ExplorerAction, ExplorerState, ExplorerView, TraceId};
use crate::inbound::http::search::SearchHit;

/// Inbound frame provided by the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Reduce one explorer action.
    Action {
        action: ExplorerAction,
        #[serde(default)]
        device: Option<DeviceProfile>,
    },
    /// Run the dropdown search without touching the explorer state.
    Search {
        query: String,
        #[serde(default)]
        limit: Option<usize>,
    },
    /// Report a new viewport and re-render the current state.
    Resize { device: DeviceProfile },
}

/// Outbound frame emitted by the session.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Current explorer state and its rendering.
    #[serde(rename_all = "camelCase")]
    State {
        trace_id: TraceId,
        state: ExplorerState,
        view: ExplorerView,
    },
    /// Search hits for a `search` frame.
    #[serde(rename_all = "camelCase")]
    SearchResults {
        trace_id: TraceId,
        query: String,
        results: Vec<SearchHit>,
    },
    /// A rejected frame; the explorer state is unchanged.
    Error { error: Error },
}

impl ServerMessage {
    /// Wrap `error`, stamping it with `trace_id` when it has none.
    pub fn error(trace_id: TraceId, error: Error) -> Self {
        let error = match error.trace_id() {
            Some(_) => error,
            None => error.with_trace_id(trace_id.to_string()),
        };
        Self::Error { error }
    }
}
