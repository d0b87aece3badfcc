//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the storage / Places client.
//! They take trait objects so the same code runs against the local
//! repository, Postgres, or a fake Places client in tests.

pub mod date_list;
pub mod datetime;
pub mod error;
pub mod itineraries;
pub mod places;

pub use date_list::generate_date_list;
pub use datetime::format_display_datetime;
pub use error::{ServiceError, ServiceResult};
pub use itineraries::{
    create_itinerary, delete_itinerary, get_itinerary, health_check, itinerary_days,
    list_itineraries, list_itineraries_by_user,
};
pub use places::{
    add_place, delete_place, handle_place, list_itinerary_places, list_places, lookup_place,
    PlaceRenderer,
};
