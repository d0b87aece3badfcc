use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

use super::schema::{itineraries, places};
use crate::api::{Itinerary, ItineraryId, LatLng, NewItinerary, NewPlace, Place, PlaceIndex};
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = itineraries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // created_at is only read by SQL tooling
pub struct ItineraryRow {
    pub itinerary_id: i64,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = itineraries)]
pub struct NewItineraryRow {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user_email: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct PlaceRow {
    pub place_index: i64,
    pub itinerary_id: Option<i64>,
    pub name: String,
    pub formatted_address: Option<String>,
    pub location: Value,
    pub place_id: String,
    pub memo: Option<String>,
    pub types: Value,
    pub datetime: Option<DateTime<Utc>>,
    pub photo_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = places)]
pub struct NewPlaceRow {
    pub itinerary_id: Option<i64>,
    pub name: String,
    pub formatted_address: Option<String>,
    pub location: Value,
    pub place_id: String,
    pub memo: Option<String>,
    pub types: Value,
    pub datetime: Option<DateTime<Utc>>,
    pub photo_reference: Option<String>,
}

impl From<ItineraryRow> for Itinerary {
    fn from(row: ItineraryRow) -> Self {
        Itinerary {
            itinerary_id: ItineraryId(row.itinerary_id),
            title: row.title,
            start_date: row.start_date,
            end_date: row.end_date,
            user_email: row.user_email,
        }
    }
}

impl From<NewItinerary> for NewItineraryRow {
    fn from(it: NewItinerary) -> Self {
        NewItineraryRow {
            title: it.title,
            start_date: it.start_date,
            end_date: it.end_date,
            user_email: it.user_email,
        }
    }
}

impl TryFrom<NewPlace> for NewPlaceRow {
    type Error = RepositoryError;

    fn try_from(place: NewPlace) -> RepositoryResult<Self> {
        let location = serde_json::to_value(place.location).map_err(|e| json_error("location", e))?;
        let types = serde_json::to_value(&place.types).map_err(|e| json_error("types", e))?;
        Ok(NewPlaceRow {
            itinerary_id: place.itinerary_id.map(i64::from),
            name: place.name,
            formatted_address: place.formatted_address,
            location,
            place_id: place.place_id,
            memo: place.memo,
            types,
            datetime: place.datetime,
            photo_reference: place.photo_reference,
        })
    }
}

impl TryFrom<PlaceRow> for Place {
    type Error = RepositoryError;

    fn try_from(row: PlaceRow) -> RepositoryResult<Self> {
        // Rows written by older tooling may carry `{}` for location.
        let location: LatLng = if row.location.as_object().is_some_and(|o| o.is_empty()) {
            LatLng::default()
        } else {
            serde_json::from_value(row.location).map_err(|e| json_error("location", e))?
        };
        let types: Vec<String> =
            serde_json::from_value(row.types).map_err(|e| json_error("types", e))?;

        Ok(Place {
            place_index: PlaceIndex(row.place_index),
            itinerary_id: row.itinerary_id.map(ItineraryId),
            name: row.name,
            formatted_address: row.formatted_address,
            location,
            place_id: row.place_id,
            memo: row.memo,
            types,
            datetime: row.datetime,
            photo_reference: row.photo_reference,
        })
    }
}

fn json_error(column: &str, err: serde_json::Error) -> RepositoryError {
    RepositoryError::internal_with_context(
        format!("Failed to convert {} JSON: {}", column, err),
        ErrorContext::new("convert_place_row").with_entity("place"),
    )
}
