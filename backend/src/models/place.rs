//! Points of interest attached to itineraries.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::itinerary::ItineraryId;

crate::define_row_id!(PlaceIndex, "Place row key (`place_index` column).");

/// Geographic coordinates as returned by the places service.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A stored place row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_index: PlaceIndex,
    pub itinerary_id: Option<ItineraryId>,
    pub name: String,
    pub formatted_address: Option<String>,
    pub location: LatLng,
    pub place_id: String,
    pub memo: Option<String>,
    pub types: Vec<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub photo_reference: Option<String>,
}

/// Place payload before insertion.
///
/// `datetime` is not read from JSON; request bodies go through
/// [`crate::api::AddPlaceRequest`], which resolves wall-clock input first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewPlace {
    #[serde(default)]
    pub itinerary_id: Option<ItineraryId>,
    pub name: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub location: LatLng,
    pub place_id: String,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_deserializing)]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default, alias = "photoReference")]
    pub photo_reference: Option<String>,
}

impl NewPlace {
    pub fn into_place(self, place_index: PlaceIndex) -> Place {
        Place {
            place_index,
            itinerary_id: self.itinerary_id,
            name: self.name,
            formatted_address: self.formatted_address,
            location: self.location,
            place_id: self.place_id,
            memo: self.memo,
            types: self.types,
            datetime: self.datetime,
            photo_reference: self.photo_reference,
        }
    }
}

/// A datetime sent by a client.
///
/// Either an RFC 3339 instant, or a wall-clock time without an offset such as
/// the `YYYY-MM-DDTHH:MM` of a `datetime-local` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeInput {
    Instant(DateTime<Utc>),
    WallClock(NaiveDateTime),
}

const WALL_CLOCK_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

impl DateTimeInput {
    /// The instant this input names when wall-clock times are read at `offset`.
    pub fn to_utc(self, offset: FixedOffset) -> Option<DateTime<Utc>> {
        match self {
            Self::Instant(instant) => Some(instant),
            Self::WallClock(naive) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|local| local.with_timezone(&Utc)),
        }
    }
}

impl FromStr for DateTimeInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Instant(instant.with_timezone(&Utc)));
        }
        WALL_CLOCK_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(Self::WallClock)
            .ok_or_else(|| format!("invalid datetime `{}`", s))
    }
}

impl<'de> Deserialize<'de> for DateTimeInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Place as returned to API consumers: the stored row with its datetime
/// rendered for display and the resolved photo URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceView {
    pub place_index: PlaceIndex,
    pub itinerary_id: Option<ItineraryId>,
    pub name: String,
    pub formatted_address: Option<String>,
    pub location: LatLng,
    pub place_id: String,
    pub memo: Option<String>,
    pub types: Vec<String>,
    pub datetime: Option<String>,
    pub photo_reference: Option<String>,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
}

impl PlaceView {
    pub fn new(place: Place, datetime: Option<String>, photo_url: Option<String>) -> Self {
        Self {
            place_index: place.place_index,
            itinerary_id: place.itinerary_id,
            name: place.name,
            formatted_address: place.formatted_address,
            location: place.location,
            place_id: place.place_id,
            memo: place.memo,
            types: place.types,
            datetime,
            photo_reference: place.photo_reference,
            photo_url,
        }
    }
}
