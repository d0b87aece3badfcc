//! Response shapes of the details endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{PlacesError, PlacesResult};
use crate::api::{ItineraryId, LatLng, NewPlace};

/// Envelope around every details response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DetailsEnvelope {
    pub status: String,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacePhoto {
    pub photo_reference: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Typed view of a details `result`. Only the requested fields are present,
/// so every field tolerates absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
    /// The `result` object exactly as received.
    #[serde(skip)]
    pub raw: Value,
}

impl PlaceDetails {
    /// Parse a `result` object, keeping the raw JSON alongside.
    pub fn from_value(raw: Value) -> PlacesResult<Self> {
        let mut details: PlaceDetails = serde_json::from_value(raw.clone())
            .map_err(|e| PlacesError::decode(format!("invalid place result: {}", e)))?;
        details.raw = raw;
        Ok(details)
    }

    pub fn first_photo_reference(&self) -> Option<&str> {
        self.photos
            .first()
            .map(|p| p.photo_reference.as_str())
            .filter(|r| !r.is_empty())
    }

    pub fn location(&self) -> LatLng {
        self.geometry
            .as_ref()
            .map(|g| g.location)
            .unwrap_or_default()
    }

    /// Row to store for this place. Memo and datetime start empty.
    ///
    /// `requested_id` is used when the response omits `place_id`.
    pub fn to_new_place(&self, requested_id: &str, itinerary_id: Option<ItineraryId>) -> NewPlace {
        NewPlace {
            itinerary_id,
            name: self.name.clone(),
            formatted_address: self.formatted_address.clone(),
            location: self.location(),
            place_id: self
                .place_id
                .clone()
                .unwrap_or_else(|| requested_id.to_string()),
            memo: None,
            types: self.types.clone(),
            datetime: None,
            photo_reference: self.first_photo_reference().map(str::to_string),
        }
    }
}
