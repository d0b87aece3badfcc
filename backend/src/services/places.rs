//! Place flows: resolve details from the Places service, store them, and turn
//! stored rows into [`PlaceView`]s for the frontend.

use chrono::FixedOffset;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::datetime::format_display_datetime;
use super::error::{ServiceError, ServiceResult};
use crate::api::{ItineraryId, NewPlace, Place, PlaceIndex, PlaceView};
use crate::db::{ErrorContext, FullRepository, RepositoryError};
use crate::places::{FieldSet, PlacesClient};

/// Turns stored places into response views.
#[derive(Clone, Copy)]
pub struct PlaceRenderer<'a> {
    places: &'a dyn PlacesClient,
    offset: FixedOffset,
}

impl<'a> PlaceRenderer<'a> {
    pub fn new(places: &'a dyn PlacesClient, offset: FixedOffset) -> Self {
        Self { places, offset }
    }

    /// View with the photo URL built from the stored reference.
    pub fn render(&self, place: Place) -> PlaceView {
        let photo_url = place
            .photo_reference
            .as_deref()
            .map(|r| self.places.photo_url(r));
        self.render_with_photo(place, photo_url)
    }

    pub fn render_with_photo(&self, place: Place, photo_url: Option<String>) -> PlaceView {
        let datetime = place
            .datetime
            .as_ref()
            .map(|dt| format_display_datetime(dt, self.offset));
        PlaceView::new(place, datetime, photo_url)
    }
}

fn require_place_id(place_id: &str) -> ServiceResult<&str> {
    let place_id = place_id.trim();
    if place_id.is_empty() {
        return Err(ServiceError::invalid("place_id is required"));
    }
    Ok(place_id)
}

/// Raw details JSON for a place.
pub async fn lookup_place(places: &dyn PlacesClient, place_id: &str) -> ServiceResult<Value> {
    let place_id = require_place_id(place_id)?;
    let details = places.place_details(place_id, FieldSet::Full).await?;
    Ok(details.raw)
}

/// Resolve `place_id` and store it with an empty memo and datetime.
///
/// The photo URL in the result comes from the first photo of the fresh
/// details response.
pub async fn handle_place(
    repo: &dyn FullRepository,
    renderer: PlaceRenderer<'_>,
    place_id: &str,
    itinerary_id: Option<ItineraryId>,
) -> ServiceResult<PlaceView> {
    let place_id = require_place_id(place_id)?;
    let details = renderer
        .places
        .place_details(place_id, FieldSet::Full)
        .await?;

    let place_index = repo
        .insert_place(details.to_new_place(place_id, itinerary_id))
        .await?;
    let stored = repo.get_place(place_index).await?;
    info!(
        place_index = %place_index,
        place_id = %stored.place_id,
        "Stored place from details lookup"
    );

    let photo_url = details
        .first_photo_reference()
        .map(|r| renderer.places.photo_url(r));
    Ok(renderer.render_with_photo(stored, photo_url))
}

/// Store a client-supplied place, filling in its photo reference.
///
/// A place without photos is stored with no reference.
pub async fn add_place(
    repo: &dyn FullRepository,
    renderer: PlaceRenderer<'_>,
    mut place: NewPlace,
) -> ServiceResult<PlaceView> {
    let place_id = require_place_id(&place.place_id)?.to_string();
    if place.name.trim().is_empty() {
        return Err(ServiceError::invalid("name is required"));
    }

    let photos = renderer
        .places
        .place_details(&place_id, FieldSet::PhotosOnly)
        .await?;
    place.photo_reference = photos.first_photo_reference().map(str::to_string);
    if place.photo_reference.is_none() {
        debug!(place_id = %place_id, "Place has no photos");
    }

    let place_index = repo.insert_place(place).await?;
    let stored = repo.get_place(place_index).await?;
    info!(place_index = %place_index, place_id = %place_id, "Added place");
    Ok(renderer.render(stored))
}

pub async fn list_places(
    repo: &dyn FullRepository,
    renderer: PlaceRenderer<'_>,
) -> ServiceResult<Vec<PlaceView>> {
    let places = repo.list_places().await?;
    Ok(places.into_iter().map(|p| renderer.render(p)).collect())
}

/// Places attached to one itinerary; NotFound when the itinerary is missing.
pub async fn list_itinerary_places(
    repo: &dyn FullRepository,
    renderer: PlaceRenderer<'_>,
    itinerary_id: ItineraryId,
) -> ServiceResult<Vec<PlaceView>> {
    repo.get_itinerary(itinerary_id).await?;
    let places = repo.list_places_for_itinerary(itinerary_id).await?;
    Ok(places.into_iter().map(|p| renderer.render(p)).collect())
}

pub async fn delete_place(repo: &dyn FullRepository, place_index: PlaceIndex) -> ServiceResult<()> {
    let deleted = repo.delete_place(place_index).await?;
    if deleted == 0 {
        warn!(place_index = %place_index, "Delete requested for unknown place");
        return Err(RepositoryError::not_found_with_context(
            "Data not found",
            ErrorContext::new("delete_place")
                .with_entity("place")
                .with_entity_id(place_index),
        )
        .into());
    }
    info!(place_index = %place_index, "Deleted place");
    Ok(())
}
