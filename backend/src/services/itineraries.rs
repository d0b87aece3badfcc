//! Itinerary operations.

use tracing::{info, warn};

use super::date_list::generate_date_list;
use super::error::{ServiceError, ServiceResult};
use crate::api::{DayEntry, Itinerary, ItineraryId, NewItinerary, WeekdayLocale};
use crate::db::{ErrorContext, FullRepository, RepositoryError};

pub async fn health_check(repo: &dyn FullRepository) -> ServiceResult<bool> {
    Ok(repo.health_check().await?)
}

/// Validate and store a new itinerary.
pub async fn create_itinerary(
    repo: &dyn FullRepository,
    itinerary: NewItinerary,
) -> ServiceResult<Itinerary> {
    if let Err(reason) = itinerary.validate() {
        warn!("Rejected itinerary: {}", reason);
        return Err(ServiceError::invalid(reason));
    }

    let stored = repo.insert_itinerary(itinerary).await?;
    info!(
        itinerary_id = %stored.itinerary_id,
        user_email = %stored.user_email,
        "Created itinerary"
    );
    Ok(stored)
}

pub async fn list_itineraries(repo: &dyn FullRepository) -> ServiceResult<Vec<Itinerary>> {
    Ok(repo.list_itineraries().await?)
}

pub async fn list_itineraries_by_user(
    repo: &dyn FullRepository,
    user_email: &str,
) -> ServiceResult<Vec<Itinerary>> {
    let user_email = user_email.trim();
    if user_email.is_empty() {
        return Err(ServiceError::invalid("userEmail is required"));
    }
    Ok(repo.list_itineraries_by_user(user_email).await?)
}

pub async fn get_itinerary(
    repo: &dyn FullRepository,
    itinerary_id: ItineraryId,
) -> ServiceResult<Itinerary> {
    Ok(repo.get_itinerary(itinerary_id).await?)
}

/// Delete an itinerary and the places attached to it.
pub async fn delete_itinerary(
    repo: &dyn FullRepository,
    itinerary_id: ItineraryId,
) -> ServiceResult<()> {
    let deleted = repo.delete_itinerary(itinerary_id).await?;
    if deleted == 0 {
        return Err(RepositoryError::not_found_with_context(
            format!("Itinerary {} not found", itinerary_id),
            ErrorContext::new("delete_itinerary")
                .with_entity("itinerary")
                .with_entity_id(itinerary_id),
        )
        .into());
    }
    info!(itinerary_id = %itinerary_id, "Deleted itinerary");
    Ok(())
}

/// Date list for a stored itinerary.
pub async fn itinerary_days(
    repo: &dyn FullRepository,
    itinerary_id: ItineraryId,
    locale: WeekdayLocale,
) -> ServiceResult<Vec<DayEntry>> {
    let itinerary = repo.get_itinerary(itinerary_id).await?;
    Ok(generate_date_list(
        itinerary.start_date,
        itinerary.end_date,
        locale,
    ))
}
