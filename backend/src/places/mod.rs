//! Client for the external Places "details" service.
//!
//! The client is stateless: each call maps one request to one response and
//! nothing is cached or retried. Handlers and services depend on the
//! [`PlacesClient`] trait so tests can swap in a fake.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{FieldSet, GooglePlacesClient, PlacesClient};
pub use config::PlacesConfig;
pub use error::{PlacesError, PlacesResult};
pub use types::{Geometry, PlaceDetails, PlacePhoto};
