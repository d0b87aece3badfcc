//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::dto::{
    AddPlaceRequest, ByUserQuery, CreateItineraryResponse, DayEntry, DaysQuery,
    HandlePlaceRequest, HealthResponse, Itinerary, MessageResponse, NewItinerary,
    PlaceInfoRequest, PlaceView,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{ItineraryId, PlaceIndex, WeekdayLocale};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Unwrap a JSON body, reporting malformed input as 400.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Itineraries
// =============================================================================

/// GET /api/itineraries
pub async fn list_itineraries(State(state): State<AppState>) -> HandlerResult<Vec<Itinerary>> {
    let itineraries = services::list_itineraries(state.repository.as_ref()).await?;
    Ok(Json(itineraries))
}

/// GET /api/itineraries/byUser?userEmail=...
pub async fn list_itineraries_by_user(
    State(state): State<AppState>,
    query: Result<Query<ByUserQuery>, QueryRejection>,
) -> HandlerResult<Vec<Itinerary>> {
    let user_email = query_params(query)?
        .user_email
        .ok_or_else(|| AppError::BadRequest("userEmail is required".to_string()))?;
    let itineraries =
        services::list_itineraries_by_user(state.repository.as_ref(), &user_email).await?;
    Ok(Json(itineraries))
}

/// POST /api/itineraries
pub async fn create_itinerary(
    State(state): State<AppState>,
    body: Result<Json<NewItinerary>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateItineraryResponse>), AppError> {
    let itinerary = json_body(body)?;
    let created = services::create_itinerary(state.repository.as_ref(), itinerary).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateItineraryResponse {
            itinerary_id: created.itinerary_id,
            message: "Itinerary created successfully".to_string(),
        }),
    ))
}

/// GET /api/itineraries/{itinerary_id}
pub async fn get_itinerary(
    State(state): State<AppState>,
    itinerary_id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<Itinerary> {
    let itinerary_id = path_id(itinerary_id)?;
    let itinerary =
        services::get_itinerary(state.repository.as_ref(), ItineraryId::new(itinerary_id))
            .await?;
    Ok(Json(itinerary))
}

/// DELETE /api/itineraries/{itinerary_id}
pub async fn delete_itinerary(
    State(state): State<AppState>,
    itinerary_id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<MessageResponse> {
    let itinerary_id = path_id(itinerary_id)?;
    services::delete_itinerary(state.repository.as_ref(), ItineraryId::new(itinerary_id))
        .await?;
    Ok(Json(MessageResponse::new("Itinerary deleted successfully")))
}

/// GET /api/itineraries/{itinerary_id}/days?locale=ja|en
pub async fn get_itinerary_days(
    State(state): State<AppState>,
    itinerary_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<DaysQuery>, QueryRejection>,
) -> HandlerResult<Vec<DayEntry>> {
    let itinerary_id = path_id(itinerary_id)?;
    let query = query_params(query)?;
    let locale = match query.locale.as_deref() {
        Some(raw) => raw.parse::<WeekdayLocale>().map_err(AppError::BadRequest)?,
        None => WeekdayLocale::default(),
    };
    let days = services::itinerary_days(
        state.repository.as_ref(),
        ItineraryId::new(itinerary_id),
        locale,
    )
    .await?;
    Ok(Json(days))
}

/// GET /api/itineraries/{itinerary_id}/places
pub async fn list_itinerary_places(
    State(state): State<AppState>,
    itinerary_id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<Vec<PlaceView>> {
    let itinerary_id = path_id(itinerary_id)?;
    let places = services::list_itinerary_places(
        state.repository.as_ref(),
        state.renderer(),
        ItineraryId::new(itinerary_id),
    )
    .await?;
    Ok(Json(places))
}

// =============================================================================
// Places
// =============================================================================

/// GET /api/places
pub async fn list_places(State(state): State<AppState>) -> HandlerResult<Vec<PlaceView>> {
    let places = services::list_places(state.repository.as_ref(), state.renderer()).await?;
    Ok(Json(places))
}

/// DELETE /api/places/{place_index}
pub async fn delete_place(
    State(state): State<AppState>,
    place_index: Result<Path<i64>, PathRejection>,
) -> HandlerResult<MessageResponse> {
    let place_index = path_id(place_index)?;
    services::delete_place(state.repository.as_ref(), PlaceIndex::new(place_index)).await?;
    Ok(Json(MessageResponse::new("Data deleted successfully")))
}

/// POST /api/places/getPlaceInfo
///
/// Returns the details `result` object unchanged.
pub async fn get_place_info(
    State(state): State<AppState>,
    body: Result<Json<PlaceInfoRequest>, JsonRejection>,
) -> HandlerResult<Value> {
    let request = json_body(body)?;
    let details = services::lookup_place(state.places.as_ref(), &request.place_id).await?;
    Ok(Json(details))
}

/// POST /api/places/handlePlace
pub async fn handle_place(
    State(state): State<AppState>,
    body: Result<Json<HandlePlaceRequest>, JsonRejection>,
) -> HandlerResult<PlaceView> {
    let request = json_body(body)?;
    let place = services::handle_place(
        state.repository.as_ref(),
        state.renderer(),
        &request.place_id,
        request.itinerary_id,
    )
    .await?;
    Ok(Json(place))
}

/// POST /api/places/addPlace
pub async fn add_place(
    State(state): State<AppState>,
    body: Result<Json<AddPlaceRequest>, JsonRejection>,
) -> HandlerResult<PlaceView> {
    let place = json_body(body)?.into_new_place(state.display_offset);
    let stored = services::add_place(state.repository.as_ref(), state.renderer(), place).await?;
    Ok(Json(stored))
}
