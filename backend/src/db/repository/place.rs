//! Place repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ItineraryId, NewPlace, Place, PlaceIndex};

/// Repository trait for places.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Insert a place row and return its new `place_index`.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ValidationError)` - If it references an unknown itinerary
    async fn insert_place(&self, place: NewPlace) -> RepositoryResult<PlaceIndex>;

    /// Retrieve one place by row key.
    async fn get_place(&self, place_index: PlaceIndex) -> RepositoryResult<Place>;

    /// List every place, ascending by row key.
    async fn list_places(&self) -> RepositoryResult<Vec<Place>>;

    /// List the places attached to an itinerary, ascending by row key.
    async fn list_places_for_itinerary(
        &self,
        itinerary_id: ItineraryId,
    ) -> RepositoryResult<Vec<Place>>;

    /// Delete a place.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows deleted (0 when absent)
    async fn delete_place(&self, place_index: PlaceIndex) -> RepositoryResult<usize>;
}
