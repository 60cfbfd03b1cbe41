//! Error types for the adventure-catalogue crate.
//!
//! Registry loading is the only fallible operation in this crate, so a single
//! semantic error enum covers file access, JSON decoding and structural
//! validation.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating a catalogue registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read catalogue registry at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid catalogue JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported catalogue version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no adventures.
    #[error("catalogue contains no adventures")]
    EmptyAdventures,

    /// An adventure identifier is malformed.
    #[error("invalid adventure id at index {index}: '{value}'")]
    InvalidAdventureId {
        /// Index of the adventure in the array.
        index: usize,
        /// The rejected identifier.
        value: String,
    },

    /// Two adventures share the same identifier.
    #[error("duplicate adventure id '{id}'")]
    DuplicateAdventureId {
        /// The repeated identifier.
        id: String,
    },

    /// A country code is not two uppercase ASCII letters.
    #[error("invalid country code '{value}' on {owner}")]
    InvalidCountryCode {
        /// Identifier of the record carrying the code.
        owner: String,
        /// The rejected code.
        value: String,
    },

    /// A city code is malformed or does not belong to its destination.
    #[error("invalid city code '{value}' in destination {destination}")]
    InvalidCityCode {
        /// Destination country code.
        destination: String,
        /// The rejected city code.
        value: String,
    },

    /// A latitude/longitude pair falls outside WGS84 ranges.
    #[error("coordinates out of range on {owner}: ({lat}, {lng})")]
    InvalidCoordinates {
        /// Identifier of the record carrying the coordinates.
        owner: String,
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lng: f64,
    },

    /// Two destinations share the same country code.
    #[error("duplicate destination '{code}'")]
    DuplicateDestination {
        /// The repeated country code.
        code: String,
    },
}
