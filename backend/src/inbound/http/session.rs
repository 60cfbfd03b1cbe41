//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or restoring the explorer
//! state of the current browser session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Catalogue, Error, ExplorerState};

pub(crate) const EXPLORER_STATE_KEY: &str = "explorer";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the explorer state in the session cookie.
    pub fn persist_explorer_state(&self, state: &ExplorerState) -> Result<(), Error> {
        self.0
            .insert(EXPLORER_STATE_KEY, state)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Restore the explorer state, or the initial state when none is stored.
    ///
    /// A cookie that no longer decodes (for example after a catalogue change)
    /// is treated as absent.
    pub fn explorer_state(&self, catalogue: &Catalogue) -> ExplorerState {
        match self.0.get::<ExplorerState>(EXPLORER_STATE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => ExplorerState::initial(catalogue),
            Err(error) => {
                warn!(error = %error, "discarding unreadable explorer state in session cookie");
                ExplorerState::initial(catalogue)
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
