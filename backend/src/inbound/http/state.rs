//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data`. It holds the
//! read-only explorer context built at startup, so handlers stay pure
//! functions over it and can be exercised without any I/O.

use crate::domain::{Catalogue, ExplorerContext, TerritoryIndex};

/// Dependency bundle for HTTP handlers.
#[derive(Debug, Clone)]
pub struct HttpState {
    pub explorer: ExplorerContext,
}

impl HttpState {
    /// Construct state from a loaded explorer context.
    ///
    /// # Examples
    /// ```
    /// use adventure_map::domain::{Catalogue, ExplorerContext, ReferenceData};
    /// use adventure_map::inbound::http::state::HttpState;
    ///
    /// let context = ExplorerContext::new(Catalogue::default(), &ReferenceData::unavailable());
    /// let state = HttpState::new(context);
    /// assert!(state.catalogue().adventures().is_empty());
    /// ```
    pub fn new(explorer: ExplorerContext) -> Self {
        Self { explorer }
    }

    pub fn catalogue(&self) -> &Catalogue {
        self.explorer.catalogue()
    }

    pub fn territories(&self) -> &TerritoryIndex {
        self.explorer.territories()
    }
}
