pub mod day;
pub mod itinerary;
pub mod macros;
pub mod place;

pub use day::*;
pub use itinerary::*;
pub use place::*;
