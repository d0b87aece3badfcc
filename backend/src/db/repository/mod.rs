//! Repository trait definitions for database operations.
//!
//! Storage is split into two focused traits so each backend stays small and
//! testable:
//!
//! - [`error`]: Error types for repository operations
//! - [`itinerary`]: CRUD operations for trips
//! - [`place`]: CRUD operations for places attached to trips
//!
//! # Convenience Trait Bound
//!
//! Handlers and services that need both use [`FullRepository`]:
//!
//! ```ignore
//! async fn attach<R: FullRepository + ?Sized>(repo: &R, place: NewPlace) -> RepositoryResult<Place> {
//!     let index = repo.insert_place(place).await?;
//!     repo.get_place(index).await
//! }
//! ```

pub mod error;
pub mod itinerary;
pub mod place;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use itinerary::ItineraryRepository;
pub use place::PlaceRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing both traits.
pub trait FullRepository: ItineraryRepository + PlaceRepository {}

impl<T> FullRepository for T where T: ItineraryRepository + PlaceRepository {}
