//! Server settings loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `ATLAS_*` environment variables and an
//! optional configuration file. Unset values fall back to the defaults below.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use adventure_map::inbound::http::session_config::SessionToggles;
use adventure_map::inbound::ws::debounce::{DEFAULT_PRICE_DELAY, DEFAULT_SEARCH_DELAY, DebounceDelays};
use adventure_map::outbound::reference::NaturalEarthEndpoints;
use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_REFERENCE_TIMEOUT: Duration = Duration::from_secs(30);
const NATURAL_EARTH_LAND_URL: &str =
    "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_50m_land.geojson";
const NATURAL_EARTH_COUNTRIES_URL: &str = "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_10m_admin_0_countries.geojson";

/// Configuration values controlling the explorer server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ATLAS")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// Registry file replacing the embedded catalogue.
    pub catalogue_path: Option<PathBuf>,
    /// Fetch Natural Earth reference data at startup.
    #[ortho_config(default = true)]
    pub reference_enabled: bool,
    /// Override for the land layer URL.
    pub reference_land_url: Option<String>,
    /// Override for the countries layer URL.
    pub reference_countries_url: Option<String>,
    /// Per-request timeout for reference downloads, in seconds.
    pub reference_timeout_secs: Option<u64>,
    /// Quiet period for search input, in milliseconds.
    pub search_debounce_ms: Option<u64>,
    /// Quiet period for price input, in milliseconds.
    pub price_debounce_ms: Option<u64>,
    /// Comma-separated origins allowed to open the WebSocket.
    pub allowed_origins: Option<String>,
    /// Session signing key file.
    pub session_key_file: Option<PathBuf>,
    /// `Secure` flag for the session cookie.
    pub session_cookie_secure: Option<String>,
    /// `SameSite` policy for the session cookie.
    pub session_samesite: Option<String>,
    /// Allow a generated key when the key file is unreadable.
    pub session_allow_ephemeral: Option<String>,
}

/// Settings values that failed to parse.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid URL for {field} '{value}': {source}")]
    Url {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("path for {field} is not valid UTF-8: {path}")]
    NonUtf8Path { field: &'static str, path: String },
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        field,
        value: value.to_owned(),
        source,
    })
}

fn utf8_path(field: &'static str, path: &PathBuf) -> Result<Utf8PathBuf, SettingsError> {
    Utf8PathBuf::from_path_buf(path.clone()).map_err(|raw| SettingsError::NonUtf8Path {
        field,
        path: raw.display().to_string(),
    })
}

impl ServerSettings {
    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Registry override, if configured.
    pub fn catalogue_path(&self) -> Result<Option<Utf8PathBuf>, SettingsError> {
        self.catalogue_path
            .as_ref()
            .map(|path| utf8_path("catalogue_path", path))
            .transpose()
    }

    /// Natural Earth layer URLs.
    pub fn reference_endpoints(&self) -> Result<NaturalEarthEndpoints, SettingsError> {
        Ok(NaturalEarthEndpoints {
            land: parse_url(
                "reference_land_url",
                self.reference_land_url
                    .as_deref()
                    .unwrap_or(NATURAL_EARTH_LAND_URL),
            )?,
            countries: parse_url(
                "reference_countries_url",
                self.reference_countries_url
                    .as_deref()
                    .unwrap_or(NATURAL_EARTH_COUNTRIES_URL),
            )?,
        })
    }

    /// Timeout applied to each reference download.
    pub fn reference_timeout(&self) -> Duration {
        self.reference_timeout_secs
            .map_or(DEFAULT_REFERENCE_TIMEOUT, Duration::from_secs)
    }

    /// Trailing debounce delays for the WebSocket session.
    pub fn debounce(&self) -> DebounceDelays {
        DebounceDelays {
            search: self
                .search_debounce_ms
                .map_or(DEFAULT_SEARCH_DELAY, Duration::from_millis),
            price: self
                .price_debounce_ms
                .map_or(DEFAULT_PRICE_DELAY, Duration::from_millis),
        }
    }

    /// Origins allowed to upgrade to the WebSocket.
    pub fn allowed_origins(&self) -> Result<Vec<Url>, SettingsError> {
        self.allowed_origins
            .as_deref()
            .unwrap_or(DEFAULT_ALLOWED_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| parse_url("allowed_origins", origin))
            .collect()
    }

    /// Raw session toggles for validation.
    pub fn session_toggles(&self) -> Result<SessionToggles, SettingsError> {
        Ok(SessionToggles {
            key_file: self
                .session_key_file
                .as_ref()
                .map(|path| utf8_path("session_key_file", path))
                .transpose()?,
            cookie_secure: self.session_cookie_secure.clone(),
            same_site: self.session_samesite.clone(),
            allow_ephemeral: self.session_allow_ephemeral.clone(),
        })
    }
}
