//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use adventure_map::inbound::http::session_config::SessionSettings;
use adventure_map::inbound::ws::debounce::DebounceDelays;
use url::Url;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origins: Vec<Url>,
    pub(crate) debounce: DebounceDelays,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            allowed_origins: Vec::new(),
            debounce: DebounceDelays::default(),
        }
    }

    /// Origins allowed to open the explorer WebSocket.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<Url>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Debounce delays for WebSocket search and price actions.
    #[must_use]
    pub fn with_debounce(mut self, debounce: DebounceDelays) -> Self {
        self.debounce = debounce;
        self
    }
}
