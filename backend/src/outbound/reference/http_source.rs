//! Reqwest-backed Natural Earth source adapter.
//!
//! This adapter owns transport details only: request timeout, HTTP error
//! mapping, and GeoJSON decoding into reference data. Land and countries are
//! fetched concurrently; when only one of them fails the other is still used.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::FeatureCollectionDto;
use crate::domain::ReferenceData;
use crate::domain::ports::{ReferenceDataError, ReferenceDataSource};

const USER_AGENT: &str = "adventure-map-reference/0.1";

/// GeoJSON endpoints for the two Natural Earth layers.
#[derive(Debug, Clone)]
pub struct NaturalEarthEndpoints {
    /// `ne_50m_land.geojson`.
    pub land: Url,
    /// `ne_10m_admin_0_countries.geojson`.
    pub countries: Url,
}

/// Reference data source performing HTTP GET requests.
pub struct NaturalEarthHttpSource {
    client: Client,
    endpoints: NaturalEarthEndpoints,
}

impl NaturalEarthHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoints: NaturalEarthEndpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoints })
    }

    async fn fetch_collection(&self, url: &Url) -> Result<FeatureCollectionDto, ReferenceDataError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/geo+json, application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(url = %url, bytes = body.len(), "reference layer downloaded");
        parse_collection(body.as_ref())
    }
}

#[async_trait]
impl ReferenceDataSource for NaturalEarthHttpSource {
    async fn fetch(&self) -> Result<ReferenceData, ReferenceDataError> {
        let (land, countries) = tokio::join!(
            self.fetch_collection(&self.endpoints.land),
            self.fetch_collection(&self.endpoints.countries),
        );
        combine(land, countries)
    }
}

fn combine(
    land: Result<FeatureCollectionDto, ReferenceDataError>,
    countries: Result<FeatureCollectionDto, ReferenceDataError>,
) -> Result<ReferenceData, ReferenceDataError> {
    match (land, countries) {
        (Err(land_error), Err(countries_error)) => {
            warn!(error = %land_error, "land layer unavailable");
            Err(countries_error)
        }
        (land, countries) => {
            let land = land
                .map(FeatureCollectionDto::into_polygon_bounds)
                .unwrap_or_else(|err| {
                    warn!(error = %err, "land layer unavailable");
                    Vec::new()
                });
            let countries = countries
                .map(FeatureCollectionDto::into_country_features)
                .unwrap_or_else(|err| {
                    warn!(error = %err, "country layer unavailable");
                    Vec::new()
                });
            Ok(ReferenceData { land, countries })
        }
    }
}

fn parse_collection(body: &[u8]) -> Result<FeatureCollectionDto, ReferenceDataError> {
    serde_json::from_slice(body)
        .map_err(|error| ReferenceDataError::decode(format!("invalid GeoJSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ReferenceDataError {
    ReferenceDataError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ReferenceDataError {
    ReferenceDataError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
