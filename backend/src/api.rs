//! Public API surface for the Rust backend.
//!
//! This file consolidates the types exchanged over HTTP so that the server
//! handlers and the client store agree on one wire format.

pub use crate::models::DateTimeInput;
pub use crate::models::DayEntry;
pub use crate::models::Itinerary;
pub use crate::models::ItineraryId;
pub use crate::models::LatLng;
pub use crate::models::NewItinerary;
pub use crate::models::NewPlace;
pub use crate::models::Place;
pub use crate::models::PlaceIndex;
pub use crate::models::PlaceView;
pub use crate::models::WeekdayLocale;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// Response body for `POST /api/itineraries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItineraryResponse {
    pub itinerary_id: ItineraryId,
    pub message: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Request body for `POST /api/places/getPlaceInfo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceInfoRequest {
    pub place_id: String,
}

/// Request body for `POST /api/places/handlePlace`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlePlaceRequest {
    pub place_id: String,
    #[serde(default)]
    pub itinerary_id: Option<ItineraryId>,
}

/// Request body for `POST /api/places/addPlace`.
///
/// A `datetime` without an offset is a wall-clock time at the display offset.
#[derive(Debug, Clone, Deserialize)]
pub struct AddPlaceRequest {
    #[serde(flatten)]
    pub place: NewPlace,
    #[serde(default)]
    pub datetime: Option<DateTimeInput>,
}

impl AddPlaceRequest {
    pub fn into_new_place(self, offset: FixedOffset) -> NewPlace {
        NewPlace {
            datetime: self.datetime.and_then(|input| input.to_utc(offset)),
            ..self.place
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_response_shape() {
        let body = CreateItineraryResponse {
            itinerary_id: ItineraryId::new(3),
            message: "ok".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["itinerary_id"], 3);
    }

    #[test]
    fn test_add_place_request_reads_wall_clock_at_offset() {
        let req: AddPlaceRequest = serde_json::from_str(
            r#"{"name":"金閣寺","place_id":"ChIJ1","itinerary_id":2,"datetime":"2024-09-05T10:00","photoReference":"r"}"#,
        )
        .unwrap();
        let place = req.into_new_place(FixedOffset::east_opt(9 * 3600).unwrap());

        assert_eq!(place.name, "金閣寺");
        assert_eq!(place.itinerary_id, Some(ItineraryId::new(2)));
        assert_eq!(place.photo_reference.as_deref(), Some("r"));
        assert_eq!(
            place.datetime.map(|dt| dt.to_rfc3339()),
            Some("2024-09-05T01:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_add_place_request_rejects_garbage_datetime() {
        let err = serde_json::from_str::<AddPlaceRequest>(
            r#"{"name":"x","place_id":"p","datetime":"tomorrow"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid datetime"));
    }

    #[test]
    fn test_handle_place_request_uses_camel_case() {
        let req: HandlePlaceRequest =
            serde_json::from_str(r#"{"placeId":"ChIJ","itineraryId":9}"#).unwrap();
        assert_eq!(req.place_id, "ChIJ");
        assert_eq!(req.itinerary_id, Some(ItineraryId::new(9)));

        let req: HandlePlaceRequest = serde_json::from_str(r#"{"placeId":"ChIJ"}"#).unwrap();
        assert!(req.itinerary_id.is_none());
    }
}
