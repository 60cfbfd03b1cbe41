//! Driven port for loading the adventure catalogue.
//!
//! The catalogue is read once at startup. Adapters own the record format and
//! hand back a validated domain [`Catalogue`].

use async_trait::async_trait;

use crate::domain::Catalogue;

/// Errors raised while loading the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueSourceError {
    /// The catalogue could not be read.
    #[error("catalogue read failed: {message}")]
    Read { message: String },
    /// The catalogue was read but breaks a record or aggregate rule.
    #[error("catalogue is invalid: {message}")]
    Invalid { message: String },
}

impl CatalogueSourceError {
    /// Build a [`CatalogueSourceError::Read`].
    #[must_use]
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Build a [`CatalogueSourceError::Invalid`].
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Port for loading the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Load and validate the full catalogue.
    async fn load(&self) -> Result<Catalogue, CatalogueSourceError>;
}

/// Fixture implementation yielding an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueSource;

#[async_trait]
impl CatalogueSource for FixtureCatalogueSource {
    async fn load(&self) -> Result<Catalogue, CatalogueSourceError> {
        Ok(Catalogue::default())
    }
}
