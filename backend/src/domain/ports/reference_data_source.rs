//! Driven port for reference geography (land and country shapes).

use async_trait::async_trait;

use crate::domain::ReferenceData;

/// Errors raised while fetching reference data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceDataError {
    /// The request could not be sent or timed out.
    #[error("reference data transport failed: {message}")]
    Transport { message: String },
    /// The upstream answered with a non-success status.
    #[error("reference data request returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body was not valid GeoJSON.
    #[error("reference data could not be decoded: {message}")]
    Decode { message: String },
}

impl ReferenceDataError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for fetching reference geography.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    /// Fetch land polygons and country features.
    async fn fetch(&self) -> Result<ReferenceData, ReferenceDataError>;
}

/// Fixture implementation that reports no reference data, as when the
/// fetch is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReferenceDataSource;

#[async_trait]
impl ReferenceDataSource for FixtureReferenceDataSource {
    async fn fetch(&self) -> Result<ReferenceData, ReferenceDataError> {
        Ok(ReferenceData::unavailable())
    }
}
