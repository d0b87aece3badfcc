//! # Shiori Rust Backend
//!
//! Backend for a travel-itinerary ("shiori") application.
//!
//! Users create itineraries with a title, a date range and an owner e-mail,
//! attach places resolved through the Places API, and view their trips as a
//! list of labelled days.
//!
//! ## Architecture
//!
//! - [`api`]: Types exchanged over HTTP
//! - [`models`]: Domain types and id newtypes
//! - [`db`]: Repository traits with in-memory and Postgres implementations
//! - [`places`]: Places API client
//! - [`services`]: Itinerary and place flows, date list generation
//! - [`client`]: Client-side itinerary store speaking to the HTTP API
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod places;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
