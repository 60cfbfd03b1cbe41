//! Identifier and coordinate validation shared by the registry loader.
//!
//! # Validation Rules
//!
//! - Adventure ids: 1 to 64 characters of lowercase ASCII letters, digits and
//!   hyphens, not starting or ending with a hyphen
//! - Country codes: exactly two uppercase ASCII letters
//! - City codes: `<country code>-<three uppercase letters>`

const ADVENTURE_ID_MAX: usize = 64;

/// Validates an adventure identifier.
///
/// # Examples
///
/// ```
/// use adventure_catalogue::is_valid_adventure_id;
///
/// assert!(is_valid_adventure_id("iceland-001"));
/// assert!(!is_valid_adventure_id("Iceland 001"));
/// assert!(!is_valid_adventure_id("-iceland"));
/// ```
#[must_use]
pub fn is_valid_adventure_id(value: &str) -> bool {
    if value.is_empty() || value.len() > ADVENTURE_ID_MAX {
        return false;
    }
    if value.starts_with('-') || value.ends_with('-') {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Validates an ISO 3166-1 alpha-2 style country code.
///
/// # Examples
///
/// ```
/// use adventure_catalogue::is_valid_country_code;
///
/// assert!(is_valid_country_code("NZ"));
/// assert!(!is_valid_country_code("nz"));
/// assert!(!is_valid_country_code("-99"));
/// ```
#[must_use]
pub fn is_valid_country_code(value: &str) -> bool {
    value.len() == 2 && value.chars().all(|c| c.is_ascii_uppercase())
}

/// Validates a city code against the destination it belongs to.
///
/// # Examples
///
/// ```
/// use adventure_catalogue::is_valid_city_code;
///
/// assert!(is_valid_city_code("IS-REY", "IS"));
/// assert!(!is_valid_city_code("NO-OSL", "IS"));
/// ```
#[must_use]
pub fn is_valid_city_code(value: &str, country_code: &str) -> bool {
    let Some((prefix, suffix)) = value.split_once('-') else {
        return false;
    };
    prefix == country_code
        && suffix.len() == 3
        && suffix.chars().all(|c| c.is_ascii_uppercase())
}

/// Returns `true` when the pair lies within WGS84 latitude/longitude ranges.
#[must_use]
pub(crate) fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}
