//! Session cookie configuration parsing and validation.
//!
//! Raw toggles come from the layered server settings (CLI, environment,
//! configuration file). Debug builds tolerate missing or malformed values and
//! log a warning; release builds require every toggle explicitly.

use actix_web::cookie::{Key, SameSite};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::warn;
use zeroize::Zeroize;

/// Default location of the session signing key.
pub const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_FIELD: &str = "session_cookie_secure";
const SAMESITE_FIELD: &str = "session_samesite";
const ALLOW_EPHEMERAL_FIELD: &str = "session_allow_ephemeral";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adventure_map::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Unvalidated session toggles as read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionToggles {
    /// Path of the signing key file.
    pub key_file: Option<Utf8PathBuf>,
    /// `Secure` cookie flag, as a boolean literal.
    pub cookie_secure: Option<String>,
    /// `SameSite` policy name.
    pub same_site: Option<String>,
    /// Whether a generated key may replace an unreadable key file.
    pub allow_ephemeral: Option<String>,
}

/// Validated session settings.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required setting is missing.
    #[error("missing required setting: {name}")]
    Missing { name: &'static str },
    /// A setting is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: Utf8PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie in release builds.
    #[error("session_samesite=None requires session_cookie_secure=1")]
    InsecureSameSiteNone,
    /// Release builds must not allow ephemeral session keys.
    #[error("session_allow_ephemeral must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Validate session toggles for the given build mode.
///
/// # Errors
///
/// Returns [`SessionConfigError`] when a release build is missing a toggle,
/// a toggle is malformed, or the key file cannot be used.
///
/// # Examples
///
/// ```rust
/// use adventure_map::inbound::http::session_config::{
///     BuildMode, SessionToggles, session_settings,
/// };
///
/// let toggles = SessionToggles {
///     key_file: Some("/nonexistent/session_key".into()),
///     ..SessionToggles::default()
/// };
/// let settings = session_settings(&toggles, BuildMode::Debug).expect("debug tolerates defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings(
    toggles: &SessionToggles,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure(toggles.cookie_secure.as_deref(), mode)?;
    let same_site = same_site(toggles.same_site.as_deref(), mode, cookie_secure)?;
    let allow_ephemeral = allow_ephemeral(toggles.allow_ephemeral.as_deref(), mode)?;
    let path = toggles
        .key_file
        .clone()
        .unwrap_or_else(|| Utf8PathBuf::from(SESSION_KEY_DEFAULT_PATH));
    let key = session_key(&path, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn cookie_secure(value: Option<&str>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    let Some(value) = value else {
        if mode.is_debug() {
            warn!("session_cookie_secure not set; defaulting to secure");
            return Ok(true);
        }
        return Err(SessionConfigError::Missing {
            name: COOKIE_SECURE_FIELD,
        });
    };
    match parse_bool(value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(value, "invalid session_cookie_secure; defaulting to secure");
            Ok(true)
        }
        None => Err(SessionConfigError::Invalid {
            name: COOKIE_SECURE_FIELD,
            value: value.to_owned(),
            expected: BOOL_EXPECTED,
        }),
    }
}

fn same_site(
    value: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    let Some(value) = value else {
        if mode.is_debug() {
            warn!("session_samesite not set; using default");
            return Ok(default_same_site);
        }
        return Err(SessionConfigError::Missing {
            name: SAMESITE_FIELD,
        });
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => {
            if !cookie_secure {
                if !mode.is_debug() {
                    return Err(SessionConfigError::InsecureSameSiteNone);
                }
                warn!("session_samesite=None without a secure cookie; browsers may reject it");
            }
            Ok(SameSite::None)
        }
        _ if mode.is_debug() => {
            warn!(value, "invalid session_samesite; using default");
            Ok(default_same_site)
        }
        _ => Err(SessionConfigError::Invalid {
            name: SAMESITE_FIELD,
            value: value.to_owned(),
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn allow_ephemeral(value: Option<&str>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    let Some(value) = value else {
        if mode.is_debug() {
            return Ok(false);
        }
        return Err(SessionConfigError::Missing {
            name: ALLOW_EPHEMERAL_FIELD,
        });
    };
    match parse_bool(value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(SessionConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value, "invalid session_allow_ephemeral; defaulting to disabled");
            Ok(false)
        }
        None => Err(SessionConfigError::Invalid {
            name: ALLOW_EPHEMERAL_FIELD,
            value: value.to_owned(),
            expected: BOOL_EXPECTED,
        }),
    }
}

fn session_key(
    path: &Utf8Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_owned(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(path = %path, error = %error, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path: path.to_owned(),
            source: error,
        }),
    }
}

/// Parse the boolean literals accepted by every session toggle.
///
/// # Examples
/// ```
/// use adventure_map::inbound::http::session_config::parse_bool;
///
/// assert_eq!(parse_bool("Yes"), Some(true));
/// assert_eq!(parse_bool("0"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
