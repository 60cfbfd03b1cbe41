//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::catalogue::test_support::embedded;
use crate::domain::geo::{Bounds, LatLng};
use crate::domain::{CountryFeature, ExplorerContext, ReferenceData};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Reference data with a world land mass and two country features.
///
/// Norway carries Svalbard as a second polygon so mainland selection has
/// something to choose between.
pub fn test_reference_data() -> ReferenceData {
    ReferenceData {
        land: vec![Bounds::from_corners(
            LatLng::new(-60.0, -180.0),
            LatLng::new(85.0, 180.0),
        )],
        countries: vec![
            CountryFeature {
                iso_a2: Some("-99".to_owned()),
                admin: Some("Norway".to_owned()),
                name: Some("Norway".to_owned()),
                polygons: vec![
                    Bounds::from_corners(LatLng::new(76.0, 10.0), LatLng::new(81.0, 34.0)),
                    Bounds::from_corners(LatLng::new(57.9, 4.5), LatLng::new(71.2, 31.1)),
                ],
            },
            CountryFeature {
                iso_a2: Some("IS".to_owned()),
                admin: Some("Iceland".to_owned()),
                name: Some("Iceland".to_owned()),
                polygons: vec![Bounds::from_corners(
                    LatLng::new(63.3, -24.5),
                    LatLng::new(66.6, -13.5),
                )],
            },
        ],
    }
}

/// Explorer context over the embedded catalogue and [`test_reference_data`].
pub fn test_explorer_context() -> ExplorerContext {
    ExplorerContext::new(embedded(), &test_reference_data())
}

/// HTTP state over [`test_explorer_context`].
pub fn test_http_state() -> HttpState {
    HttpState::new(test_explorer_context())
}
