//! Shared WebSocket adapter state.

use std::sync::Arc;

use url::{Origin, Url};

use crate::domain::ExplorerContext;
use crate::inbound::ws::debounce::DebounceDelays;

/// Dependency bundle for WebSocket upgrades and sessions.
#[derive(Debug, Clone)]
pub struct WsState {
    pub context: ExplorerContext,
    pub debounce: DebounceDelays,
    allowed_origins: Arc<[Origin]>,
}

impl WsState {
    /// Construct state from the explorer context and configured origins.
    ///
    /// # Examples
    /// ```
    /// use adventure_map::domain::{Catalogue, ExplorerContext, ReferenceData};
    /// use adventure_map::inbound::ws::debounce::DebounceDelays;
    /// use adventure_map::inbound::ws::state::WsState;
    /// use url::Url;
    ///
    /// let context = ExplorerContext::new(Catalogue::default(), &ReferenceData::unavailable());
    /// let origin = Url::parse("http://localhost:3000").expect("valid url");
    /// let state = WsState::new(context, DebounceDelays::default(), [origin.clone()]);
    /// assert!(state.allows(&origin));
    /// ```
    pub fn new(
        context: ExplorerContext,
        debounce: DebounceDelays,
        allowed_origins: impl IntoIterator<Item = Url>,
    ) -> Self {
        let allowed_origins = allowed_origins
            .into_iter()
            .map(|url| url.origin())
            .filter(Origin::is_tuple)
            .collect();
        Self {
            context,
            debounce,
            allowed_origins,
        }
    }

    /// Whether `origin` matches an allowed scheme, host and port exactly.
    pub fn allows(&self, origin: &Url) -> bool {
        let origin = origin.origin();
        self.allowed_origins.iter().any(|allowed| *allowed == origin)
    }
}
