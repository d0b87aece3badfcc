//! Places client trait and the reqwest-backed implementation.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::config::PlacesConfig;
use super::error::{PlacesError, PlacesResult};
use super::types::{DetailsEnvelope, PlaceDetails};

/// Photo width requested when building photo URLs.
pub const PHOTO_MAX_WIDTH: u32 = 400;

/// Which `fields` to ask the details endpoint for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSet {
    /// Everything a stored place needs.
    Full,
    /// Photo references only.
    PhotosOnly,
}

impl FieldSet {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldSet::Full => "name,formatted_address,geometry,place_id,types,photos",
            FieldSet::PhotosOnly => "photos",
        }
    }
}

#[async_trait]
pub trait PlacesClient: Send + Sync {
    /// Fetch details for `place_id`, restricted to `fields`.
    async fn place_details(&self, place_id: &str, fields: FieldSet) -> PlacesResult<PlaceDetails>;

    /// URL of the image behind a photo reference.
    fn photo_url(&self, photo_reference: &str) -> String;
}

/// [`PlacesClient`] talking to the Google Places web service.
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    http: Client,
    config: PlacesConfig,
}

impl GooglePlacesClient {
    pub fn new(config: PlacesConfig) -> PlacesResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PlacesError::Configuration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> PlacesResult<Self> {
        Self::new(PlacesConfig::from_env())
    }

    pub fn config(&self) -> &PlacesConfig {
        &self.config
    }
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    async fn place_details(&self, place_id: &str, fields: FieldSet) -> PlacesResult<PlaceDetails> {
        let url = format!("{}/details/json", self.config.base_url);
        debug!(place_id, fields = fields.as_str(), "Requesting place details");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("fields", fields.as_str()),
                ("key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let envelope: DetailsEnvelope = response
            .json()
            .await
            .map_err(|e| PlacesError::decode(format!("invalid details body: {}", e)))?;

        if envelope.status != "OK" {
            warn!(
                place_id,
                status = %envelope.status,
                "Places API returned a non-OK status"
            );
            return Err(PlacesError::from_status(
                &envelope.status,
                place_id,
                envelope.error_message,
            ));
        }

        let result = envelope
            .result
            .ok_or_else(|| PlacesError::decode("status OK without a result"))?;
        PlaceDetails::from_value(result)
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        format!(
            "{}/photo?maxwidth={}&photoreference={}&key={}",
            self.config.base_url, PHOTO_MAX_WIDTH, photo_reference, self.config.api_key
        )
    }
}
