//! Data Transfer Objects for the HTTP API.
//!
//! Request and response bodies shared with the client store live in
//! [`crate::api`]; this module holds the query strings and responses that
//! only the server needs.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    AddPlaceRequest, CreateItineraryResponse, DayEntry, HandlePlaceRequest, Itinerary, MessageResponse,
    NewItinerary, NewPlace, PlaceInfoRequest, PlaceView,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Query for `GET /api/itineraries/byUser`.
#[derive(Debug, Clone, Deserialize)]
pub struct ByUserQuery {
    #[serde(rename = "userEmail")]
    pub user_email: Option<String>,
}

/// Query for `GET /api/itineraries/{id}/days`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaysQuery {
    pub locale: Option<String>,
}
