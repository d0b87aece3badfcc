//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. Rows live in ordered maps
//! keyed by their ids, so listings come back in insertion order.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{Itinerary, ItineraryId, NewItinerary, NewPlace, Place, PlaceIndex};
use crate::db::repository::*;

/// In-memory local repository.
///
/// # Example
/// ```
/// use shiori_rust::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.itinerary_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Debug)]
struct LocalData {
    itineraries: BTreeMap<ItineraryId, Itinerary>,
    places: BTreeMap<PlaceIndex, Place>,

    // ID counters
    next_itinerary_id: i64,
    next_place_index: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            itineraries: BTreeMap::new(),
            places: BTreeMap::new(),
            next_itinerary_id: 1,
            next_place_index: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository. Id counters restart at 1.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn itinerary_count(&self) -> usize {
        self.data.read().itineraries.len()
    }

    pub fn place_count(&self) -> usize {
        self.data.read().places.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItineraryRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_itinerary(&self, itinerary: NewItinerary) -> RepositoryResult<Itinerary> {
        self.check_health("insert_itinerary")?;

        let mut data = self.data.write();
        let itinerary_id = ItineraryId::new(data.next_itinerary_id);
        data.next_itinerary_id += 1;

        let stored = itinerary.with_id(itinerary_id);
        data.itineraries.insert(itinerary_id, stored.clone());
        Ok(stored)
    }

    async fn get_itinerary(&self, itinerary_id: ItineraryId) -> RepositoryResult<Itinerary> {
        self.check_health("get_itinerary")?;

        self.data
            .read()
            .itineraries
            .get(&itinerary_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Itinerary {} not found", itinerary_id),
                    ErrorContext::new("get_itinerary")
                        .with_entity("itinerary")
                        .with_entity_id(itinerary_id),
                )
            })
    }

    async fn list_itineraries(&self) -> RepositoryResult<Vec<Itinerary>> {
        self.check_health("list_itineraries")?;
        Ok(self.data.read().itineraries.values().cloned().collect())
    }

    async fn list_itineraries_by_user(
        &self,
        user_email: &str,
    ) -> RepositoryResult<Vec<Itinerary>> {
        self.check_health("list_itineraries_by_user")?;
        Ok(self
            .data
            .read()
            .itineraries
            .values()
            .filter(|it| it.user_email == user_email)
            .cloned()
            .collect())
    }

    async fn delete_itinerary(&self, itinerary_id: ItineraryId) -> RepositoryResult<usize> {
        self.check_health("delete_itinerary")?;

        let mut data = self.data.write();
        if data.itineraries.remove(&itinerary_id).is_none() {
            return Ok(0);
        }
        data.places
            .retain(|_, place| place.itinerary_id != Some(itinerary_id));
        Ok(1)
    }
}

#[async_trait]
impl PlaceRepository for LocalRepository {
    async fn insert_place(&self, place: NewPlace) -> RepositoryResult<PlaceIndex> {
        self.check_health("insert_place")?;

        let mut data = self.data.write();
        if let Some(itinerary_id) = place.itinerary_id {
            if !data.itineraries.contains_key(&itinerary_id) {
                return Err(RepositoryError::validation_with_context(
                    format!("Itinerary {} does not exist", itinerary_id),
                    ErrorContext::new("insert_place")
                        .with_entity("itinerary")
                        .with_entity_id(itinerary_id),
                ));
            }
        }

        let place_index = PlaceIndex::new(data.next_place_index);
        data.next_place_index += 1;
        data.places.insert(place_index, place.into_place(place_index));
        Ok(place_index)
    }

    async fn get_place(&self, place_index: PlaceIndex) -> RepositoryResult<Place> {
        self.check_health("get_place")?;

        self.data
            .read()
            .places
            .get(&place_index)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Place {} not found", place_index),
                    ErrorContext::new("get_place")
                        .with_entity("place")
                        .with_entity_id(place_index),
                )
            })
    }

    async fn list_places(&self) -> RepositoryResult<Vec<Place>> {
        self.check_health("list_places")?;
        Ok(self.data.read().places.values().cloned().collect())
    }

    async fn list_places_for_itinerary(
        &self,
        itinerary_id: ItineraryId,
    ) -> RepositoryResult<Vec<Place>> {
        self.check_health("list_places_for_itinerary")?;
        Ok(self
            .data
            .read()
            .places
            .values()
            .filter(|p| p.itinerary_id == Some(itinerary_id))
            .cloned()
            .collect())
    }

    async fn delete_place(&self, place_index: PlaceIndex) -> RepositoryResult<usize> {
        self.check_health("delete_place")?;
        let removed = self.data.write().places.remove(&place_index).is_some();
        Ok(usize::from(removed))
    }
}
