//! Itinerary repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Itinerary, ItineraryId, NewItinerary};

/// Repository trait for trip records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    /// Check if the database connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a new itinerary and return it with its assigned id.
    async fn insert_itinerary(&self, itinerary: NewItinerary) -> RepositoryResult<Itinerary>;

    /// Retrieve one itinerary.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the itinerary doesn't exist
    async fn get_itinerary(&self, itinerary_id: ItineraryId) -> RepositoryResult<Itinerary>;

    /// List every itinerary, ascending by id.
    async fn list_itineraries(&self) -> RepositoryResult<Vec<Itinerary>>;

    /// List the itineraries owned by `user_email` (exact match), ascending by id.
    async fn list_itineraries_by_user(&self, user_email: &str)
        -> RepositoryResult<Vec<Itinerary>>;

    /// Delete an itinerary together with its places.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of itinerary rows deleted (0 when absent)
    async fn delete_itinerary(&self, itinerary_id: ItineraryId) -> RepositoryResult<usize>;
}
